//! Sector composition table.

use once_cell::sync::Lazy;
use psx_core::SectorRecord;

fn sector(
    id: u32,
    name: &str,
    market_cap: i64,
    weight_percent: f64,
    companies_count: u32,
    day_change_percent: f64,
    avg_pe_ratio: f64,
    color: &str,
) -> SectorRecord {
    SectorRecord {
        id,
        name: name.to_string(),
        market_cap,
        weight_percent,
        companies_count,
        day_change_percent,
        avg_pe_ratio,
        color: color.to_string(),
    }
}

/// Major KSE100 sectors with approximate index weights.
static SECTORS: Lazy<Vec<SectorRecord>> = Lazy::new(|| {
    vec![
        sector(1, "Commercial Banks", 2_854_000_000_000, 33.4, 18, -0.65, 4.2, "#0088FE"),
        sector(2, "Oil & Gas Exploration Companies", 1_456_000_000_000, 17.0, 9, -0.42, 3.8, "#00C49F"),
        sector(3, "Oil & Gas Marketing Companies", 985_000_000_000, 11.5, 6, -0.55, 5.1, "#FFBB28"),
        sector(4, "Fertilizer", 742_000_000_000, 8.7, 5, -1.12, 3.5, "#FF8042"),
        sector(5, "Cement", 612_000_000_000, 7.2, 8, -0.89, 6.8, "#8884D8"),
        sector(6, "Power Generation & Distribution", 528_000_000_000, 6.2, 12, -0.45, 4.9, "#82CA9D"),
        sector(7, "Technology & Communication", 445_000_000_000, 5.2, 7, -0.78, 7.2, "#FFC658"),
        sector(8, "Food & Personal Care Products", 389_000_000_000, 4.6, 9, -0.32, 12.5, "#FF6B9D"),
        sector(9, "Automobile & Parts", 321_000_000_000, 3.8, 5, -1.25, 8.3, "#C084FC"),
        sector(10, "Others", 215_000_000_000, 2.4, 21, -0.51, 9.1, "#94A3B8"),
    ]
});

/// All sector rows, in index-weight order.
#[must_use]
pub fn all_sectors() -> &'static [SectorRecord] {
    &SECTORS
}
