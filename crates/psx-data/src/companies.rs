//! Top companies table.

use once_cell::sync::Lazy;
use psx_core::CompanyRecord;

#[allow(clippy::too_many_arguments)]
fn company(
    rank: u32,
    symbol: &str,
    name: &str,
    sector: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    market_cap: i64,
    pe_ratio: f64,
    dividend_yield: f64,
    eps: f64,
    volume: i64,
    year_high: f64,
    year_low: f64,
) -> CompanyRecord {
    CompanyRecord {
        rank,
        symbol: symbol.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        price,
        change,
        change_percent,
        market_cap,
        pe_ratio,
        dividend_yield,
        eps,
        volume,
        year_high,
        year_low,
    }
}

/// Top KSE100 companies by market capitalization.
static TOP_COMPANIES: Lazy<Vec<CompanyRecord>> = Lazy::new(|| {
    vec![
        company(1, "HBL", "Habib Bank Limited", "Commercial Banks",
            187.50, -1.25, -0.66, 385_000_000_000, 3.8, 6.2, 49.34, 5_420_000, 225.00, 165.00),
        company(2, "OGDC", "Oil & Gas Development Company Limited", "Oil & Gas Exploration Companies",
            245.30, -2.10, -0.85, 1_056_000_000_000, 4.2, 8.5, 58.40, 8_950_000, 295.00, 215.00),
        company(3, "UBL", "United Bank Limited", "Commercial Banks",
            245.80, -1.60, -0.65, 342_000_000_000, 4.1, 5.8, 59.95, 3_210_000, 282.00, 218.00),
        company(4, "MCB", "MCB Bank Limited", "Commercial Banks",
            289.40, -1.85, -0.63, 328_000_000_000, 4.5, 6.5, 64.31, 2_850_000, 325.00, 255.00),
        company(5, "PPL", "Pakistan Petroleum Limited", "Oil & Gas Exploration Companies",
            195.70, -0.95, -0.48, 400_000_000_000, 3.5, 9.2, 55.91, 6_430_000, 235.00, 175.00),
        company(6, "MEBL", "Meezan Bank Limited", "Commercial Banks",
            156.30, -1.10, -0.70, 295_000_000_000, 5.2, 4.8, 30.06, 4_120_000, 185.00, 140.00),
        company(7, "PSO", "Pakistan State Oil Company Limited", "Oil & Gas Marketing Companies",
            325.50, -2.40, -0.73, 485_000_000_000, 4.8, 7.8, 67.81, 1_950_000, 395.00, 285.00),
        company(8, "ENGRO", "Engro Corporation Limited", "Fertilizer",
            385.20, -3.50, -0.90, 350_000_000_000, 5.5, 6.0, 70.04, 2_340_000, 445.00, 335.00),
        company(9, "BAFL", "Bank Alfalah Limited", "Commercial Banks",
            89.50, -0.65, -0.72, 278_000_000_000, 4.3, 5.5, 20.81, 5_680_000, 105.00, 78.00),
        company(10, "FFC", "Fauji Fertilizer Company Limited", "Fertilizer",
            145.80, -1.30, -0.88, 392_000_000_000, 3.8, 8.9, 38.37, 7_320_000, 175.00, 128.00),
        company(11, "LUCK", "Lucky Cement Limited", "Cement",
            895.50, -8.30, -0.92, 285_000_000_000, 7.2, 4.5, 124.38, 1_120_000, 1050.00, 785.00),
        company(12, "FCCL", "Fauji Cement Company Limited", "Cement",
            42.35, -0.45, -1.05, 127_000_000_000, 6.5, 5.2, 6.51, 8_950_000, 52.00, 35.00),
        company(13, "HUBC", "Hub Power Company Limited", "Power Generation & Distribution",
            125.70, -0.85, -0.67, 245_000_000_000, 5.1, 7.2, 24.65, 3_450_000, 148.00, 110.00),
        company(14, "TRG", "TRG Pakistan Limited", "Technology & Communication",
            185.40, -1.70, -0.91, 235_000_000_000, 8.5, 3.2, 21.81, 1_890_000, 215.00, 155.00),
        company(15, "NRL", "National Refinery Limited", "Oil & Gas Marketing Companies",
            425.50, -2.80, -0.65, 215_000_000_000, 6.2, 6.5, 68.63, 895_000, 485.00, 375.00),
    ]
});

/// All companies in rank order.
#[must_use]
pub fn all_companies() -> &'static [CompanyRecord] {
    &TOP_COMPANIES
}

/// All companies whose sector name matches `sector_name` exactly.
#[must_use]
pub fn companies_in_sector(sector_name: &str) -> Vec<CompanyRecord> {
    TOP_COMPANIES
        .iter()
        .filter(|c| c.sector == sector_name)
        .cloned()
        .collect()
}
