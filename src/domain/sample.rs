//! Downloadable sample trade file.

/// Example upload in the recognized schema.
pub const SAMPLE_CSV: &str = "symbol,qty,price,slippage
RELIANCE,100,2450.5,0.85%
TCS,50,3520.75,1.2%
INFY,200,1450.25,0.95%
HDFCBANK,150,1650.25,1.1%
ICICIBANK,300,945.6,0.75%
SBIN,500,612.3,1.35%
WIPRO,250,455.8,0.9%
BHARTIARTL,120,1180.4,1.05%
";

pub const SAMPLE_FILE_NAME: &str = "sample-trades.csv";
