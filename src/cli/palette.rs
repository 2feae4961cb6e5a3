use dulcevida_shared::palette::{self, PALETTE};

pub fn list() {
    for color in PALETTE.iter() {
        println!("{}  {}", color.hex, color.name);
    }
}

/// Resolve the `set` arguments into a `(color, color_name)` pair.
///
/// An explicit `name` always wins; otherwise the color must be in the palette.
pub fn resolve(color: &str, name: Option<&str>) -> anyhow::Result<(String, String)> {
    let found = palette::find(color);
    let hex = found.map(|c| c.hex).unwrap_or(color.trim());

    if !hex.starts_with('#') {
        anyhow::bail!("unknown color '{color}', use a palette name or a #hex token");
    }

    let name = match (name, found) {
        (Some(name), _) if !name.trim().is_empty() => name.trim(),
        (_, Some(found)) => found.name,
        _ => anyhow::bail!("color {hex} is not in the palette, pass --name"),
    };

    Ok((hex.to_owned(), name.to_owned()))
}
