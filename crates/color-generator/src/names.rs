//! Offline color names.
//!
//! Used when no remote naming backend is reachable. Picks the perceptually
//! closest entry from a fixed table, so the same input always gets the same
//! name.

use once_cell::sync::Lazy;
use palette::{color_difference::Ciede2000, FromColor, Lab, Srgb};

use crate::HexColor;

const NAMED_COLORS: &[(&str, &str)] = &[
    ("#000000", "Black"),
    ("#1C1C1C", "Jet Black"),
    ("#36454F", "Charcoal"),
    ("#555555", "Graphite"),
    ("#808080", "Gray"),
    ("#A9A9A9", "Dark Silver"),
    ("#C0C0C0", "Silver"),
    ("#D3D3D3", "Light Gray"),
    ("#F5F5F5", "White Smoke"),
    ("#FFFFFF", "White"),
    ("#FFFFF0", "Ivory"),
    ("#F5F5DC", "Beige"),
    ("#FFFDD0", "Cream"),
    ("#F0EAD6", "Eggshell"),
    ("#E1C699", "Sand"),
    ("#C2B280", "Ecru"),
    ("#D2B48C", "Tan"),
    ("#C19A6B", "Camel"),
    ("#A0522D", "Sienna"),
    ("#8B4513", "Saddle Brown"),
    ("#7B3F00", "Chocolate"),
    ("#4B3621", "Cafe Noir"),
    ("#800000", "Maroon"),
    ("#960018", "Carmine"),
    ("#B22222", "Firebrick"),
    ("#DC143C", "Crimson"),
    ("#FF0000", "Red"),
    ("#FF6347", "Tomato"),
    ("#FF7F50", "Coral"),
    ("#FA8072", "Salmon"),
    ("#E9967A", "Dark Salmon"),
    ("#FFB6C1", "Light Pink"),
    ("#FFC0CB", "Pink"),
    ("#FF69B4", "Hot Pink"),
    ("#FF1493", "Deep Pink"),
    ("#C71585", "Medium Violet Red"),
    ("#E0115F", "Ruby"),
    ("#DE3163", "Cerise"),
    ("#FF00FF", "Magenta"),
    ("#DA70D6", "Orchid"),
    ("#DDA0DD", "Plum"),
    ("#E6E6FA", "Lavender"),
    ("#C8A2C8", "Lilac"),
    ("#9966CC", "Amethyst"),
    ("#8A2BE2", "Blue Violet"),
    ("#800080", "Purple"),
    ("#4B0082", "Indigo"),
    ("#483D8B", "Dark Slate Blue"),
    ("#191970", "Midnight Blue"),
    ("#000080", "Navy"),
    ("#0000CD", "Medium Blue"),
    ("#0000FF", "Blue"),
    ("#0047AB", "Cobalt"),
    ("#4169E1", "Royal Blue"),
    ("#1E90FF", "Dodger Blue"),
    ("#007FFF", "Azure"),
    ("#6495ED", "Cornflower Blue"),
    ("#4682B4", "Steel Blue"),
    ("#87CEEB", "Sky Blue"),
    ("#ADD8E6", "Light Blue"),
    ("#B0E0E6", "Powder Blue"),
    ("#00BFFF", "Deep Sky Blue"),
    ("#00FFFF", "Cyan"),
    ("#40E0D0", "Turquoise"),
    ("#7FFFD4", "Aquamarine"),
    ("#008080", "Teal"),
    ("#2F4F4F", "Dark Slate Gray"),
    ("#008B8B", "Dark Cyan"),
    ("#3EB489", "Mint"),
    ("#50C878", "Emerald"),
    ("#2E8B57", "Sea Green"),
    ("#228B22", "Forest Green"),
    ("#008000", "Green"),
    ("#006400", "Dark Green"),
    ("#355E3B", "Hunter Green"),
    ("#808000", "Olive"),
    ("#6B8E23", "Olive Drab"),
    ("#9ACD32", "Yellow Green"),
    ("#32CD32", "Lime Green"),
    ("#00FF00", "Lime"),
    ("#7FFF00", "Chartreuse"),
    ("#98FB98", "Pale Green"),
    ("#B2AC88", "Sage"),
    ("#F0E68C", "Khaki"),
    ("#FFFF00", "Yellow"),
    ("#FFF44F", "Lemon"),
    ("#FFD700", "Gold"),
    ("#DAA520", "Goldenrod"),
    ("#FFBF00", "Amber"),
    ("#E1AD01", "Mustard"),
    ("#FFDAB9", "Peach"),
    ("#FBCEB1", "Apricot"),
    ("#FFA500", "Orange"),
    ("#FF8C00", "Dark Orange"),
    ("#CC5500", "Burnt Orange"),
    ("#B7410E", "Rust"),
    ("#CD7F32", "Bronze"),
    ("#B87333", "Copper"),
];

struct Named {
    lab: Lab,
    name: &'static str,
}

static TABLE: Lazy<Vec<Named>> = Lazy::new(|| {
    NAMED_COLORS
        .iter()
        .filter_map(|(hex, name)| {
            HexColor::parse(hex).ok().map(|color| Named {
                lab: to_lab(color),
                name,
            })
        })
        .collect()
});

fn to_lab(color: HexColor) -> Lab {
    let (r, g, b) = color.rgb();

    Lab::from_color(Srgb::new(r as f32 / 255., g as f32 / 255., b as f32 / 255.))
}

/// Name of the table color closest to `color` by CIEDE2000. Ties go to the
/// entry listed first.
pub fn nearest_name(color: HexColor) -> &'static str {
    let lab = to_lab(color);

    let mut best: Option<(&Named, f32)> = None;
    for named in TABLE.iter() {
        let diff = Ciede2000::difference(lab, named.lab);

        match best {
            Some((_, best_diff)) if best_diff <= diff => {}
            _ => best = Some((named, diff)),
        }
    }

    best.map(|(named, _)| named.name).unwrap_or("Unnamed")
}
