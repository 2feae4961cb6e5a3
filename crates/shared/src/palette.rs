//! Shirt colors offered by the scheduling widget.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

const fn color(name: &'static str, hex: &'static str) -> PaletteColor {
    PaletteColor { name, hex }
}

pub const PALETTE: [PaletteColor; 12] = [
    color("Rojo", "#ef4444"),
    color("Azul", "#3b82f6"),
    color("Verde", "#10b981"),
    color("Amarillo", "#f59e0b"),
    color("Morado", "#8b5cf6"),
    color("Rosa", "#ec4899"),
    color("Blanco", "#ffffff"),
    color("Negro", "#1f2937"),
    color("Gris", "#6b7280"),
    color("Rojo Oscuro", "#dc2626"),
    color("Azul Marino", "#1e40af"),
    color("Verde Oscuro", "#059669"),
];

/// Look a color up by hex token or by name, ignoring case.
pub fn find(query: &str) -> Option<&'static PaletteColor> {
    let query = query.trim();
    PALETTE
        .iter()
        .find(|c| c.hex.eq_ignore_ascii_case(query) || c.name.eq_ignore_ascii_case(query))
}
