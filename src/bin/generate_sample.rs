//! Writes `sample_indicators.xlsx`, a World Bank style workbook for trying
//! the dashboard without downloading the real data set.

use rust_xlsxwriter::{Workbook, XlsxError};

const FIRST_YEAR: u16 = 1960;
const LAST_YEAR: u16 = 2024;

/// Deterministic splitmix64 stream.
struct SplitMix(u64);

impl SplitMix {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in `[-amplitude, amplitude]`.
    fn jitter(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

struct IndicatorSpec {
    name: &'static str,
    code: &'static str,
    first_year: u16,
    start: f64,
    annual_growth: f64,
    noise: f64,
    /// Probability that a year is left blank.
    gap_rate: f64,
}

const INDICATORS: &[IndicatorSpec] = &[
    IndicatorSpec {
        name: "GDP (current US$)",
        code: "NY.GDP.MKTP.CD",
        first_year: 1960,
        start: 4.2e9,
        annual_growth: 0.075,
        noise: 0.08,
        gap_rate: 0.0,
    },
    IndicatorSpec {
        name: "Population, total",
        code: "SP.POP.TOTL",
        first_year: 1960,
        start: 45.1e6,
        annual_growth: 0.026,
        noise: 0.002,
        gap_rate: 0.0,
    },
    IndicatorSpec {
        name: "CO2 emissions (metric tons per capita)",
        code: "EN.ATM.CO2E.PC",
        first_year: 1990,
        start: 0.72,
        annual_growth: -0.004,
        noise: 0.05,
        gap_rate: 0.05,
    },
    IndicatorSpec {
        name: "Inflation, consumer prices (annual %)",
        code: "FP.CPI.TOTL.ZG",
        first_year: 1961,
        start: 6.0,
        annual_growth: 0.01,
        noise: 0.45,
        gap_rate: 0.1,
    },
    IndicatorSpec {
        name: "Life expectancy at birth, total (years)",
        code: "SP.DYN.LE00.IN",
        first_year: 1960,
        start: 37.0,
        annual_growth: 0.0055,
        noise: 0.003,
        gap_rate: 0.0,
    },
];

fn main() -> Result<(), XlsxError> {
    let mut rng = SplitMix(2024);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data")?;

    // Preamble rows skipped by the loader.
    sheet.write_string(0, 0, "Data Source")?;
    sheet.write_string(0, 1, "World Development Indicators")?;
    sheet.write_string(2, 0, "Last Updated Date")?;
    sheet.write_string(2, 1, "2025-07-01")?;

    let header_row = 3;
    for (col, label) in ["Country Name", "Country Code", "Indicator Name", "Indicator Code"]
        .iter()
        .enumerate()
    {
        sheet.write_string(header_row, col as u16, *label)?;
    }
    for year in FIRST_YEAR..=LAST_YEAR {
        sheet.write_string(header_row, 4 + year - FIRST_YEAR, year.to_string())?;
    }

    let mut written = 0usize;
    for (i, spec) in INDICATORS.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        sheet.write_string(row, 0, "Nigeria")?;
        sheet.write_string(row, 1, "NGA")?;
        sheet.write_string(row, 2, spec.name)?;
        sheet.write_string(row, 3, spec.code)?;

        let mut level = spec.start;
        for year in spec.first_year..=LAST_YEAR {
            level *= 1.0 + spec.annual_growth + rng.jitter(spec.noise);
            if rng.next_f64() < spec.gap_rate {
                continue;
            }
            sheet.write_number(row, 4 + year - FIRST_YEAR, level)?;
            written += 1;
        }
    }

    let output_path = "sample_indicators.xlsx";
    workbook.save(output_path)?;
    println!(
        "Wrote {} indicators ({written} observations) to {output_path}",
        INDICATORS.len()
    );
    Ok(())
}
