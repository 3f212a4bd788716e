use std::f64::consts::TAU;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use salary_dashboard::config::DEFAULT_DATA_FILE;
use salary_dashboard::data::model::SalaryRecord;

const ROWS: usize = 5_000;

const YEARS: [i32; 5] = [2020, 2021, 2022, 2023, 2024];
const SENIORITIES: [(&str, f64); 4] = [
    ("junior", 0.6),
    ("pleno", 0.85),
    ("senior", 1.1),
    ("executivo", 1.5),
];
const CONTRACTS: [&str; 4] = ["integral", "parcial", "contrato", "freelancer"];
const SIZES: [&str; 3] = ["pequena", "media", "grande"];
const REMOTE: [&str; 3] = ["remoto", "presencial", "hibrido"];
const ROLES: [(&str, f64); 8] = [
    ("Data Scientist", 140_000.0),
    ("Data Engineer", 145_000.0),
    ("Data Analyst", 95_000.0),
    ("Machine Learning Engineer", 175_000.0),
    ("Analytics Engineer", 150_000.0),
    ("Research Scientist", 185_000.0),
    ("Data Architect", 165_000.0),
    ("BI Developer", 90_000.0),
];
const COUNTRIES: [(&str, f64); 6] = [
    ("USA", 1.0),
    ("CAN", 0.8),
    ("GBR", 0.7),
    ("DEU", 0.7),
    ("BRA", 0.35),
    ("IND", 0.3),
];

/// Uniform pick from a non-empty table.
fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Standard normal draw (Box-Muller).
fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn generate(rng: &mut ChaCha8Rng, rows: usize) -> Vec<SalaryRecord> {
    (0..rows)
        .map(|_| {
            let year = *pick(rng, &YEARS);
            let &(seniority, level) = pick(rng, &SENIORITIES);
            let &(role, base) = pick(rng, &ROLES);
            let &(country, market) = pick(rng, &COUNTRIES);
            // Log-normal spread around the role/level/market base.
            let growth = 1.0 + 0.04 * (year - YEARS[0]) as f64;
            let salary = base * level * market * growth * (0.25 * standard_normal(rng)).exp();

            SalaryRecord {
                year,
                seniority: seniority.to_string(),
                contract: pick(rng, &CONTRACTS).to_string(),
                company_size: pick(rng, &SIZES).to_string(),
                role: role.to_string(),
                remote: pick(rng, &REMOTE).to_string(),
                salary_usd: salary.round(),
                country: country.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &str, records: &[SalaryRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for rec in records {
        writer.serialize(rec).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, records: &[SalaryRecord]) -> Result<()> {
    let strings = |f: fn(&SalaryRecord) -> &str| {
        StringArray::from(records.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("ano", DataType::Int64, false),
        Field::new("senioridade", DataType::Utf8, false),
        Field::new("contrato", DataType::Utf8, false),
        Field::new("tamanho_empresa", DataType::Utf8, false),
        Field::new("cargo", DataType::Utf8, false),
        Field::new("remoto", DataType::Utf8, false),
        Field::new("salario_anual_conv_usd", DataType::Float64, false),
        Field::new("residencia_iso3", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(
                records.iter().map(|r| r.year as i64).collect::<Vec<_>>(),
            )),
            Arc::new(strings(|r| r.seniority.as_str())),
            Arc::new(strings(|r| r.contract.as_str())),
            Arc::new(strings(|r| r.company_size.as_str())),
            Arc::new(strings(|r| r.role.as_str())),
            Arc::new(strings(|r| r.remote.as_str())),
            Arc::new(Float64Array::from(
                records.iter().map(|r| r.salary_usd).collect::<Vec<_>>(),
            )),
            Arc::new(strings(|r| r.country.as_str())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let records = generate(&mut rng, ROWS);

    let csv_path = DEFAULT_DATA_FILE;
    let parquet_path = csv_path.replace(".csv", ".parquet");
    write_csv(csv_path, &records)?;
    write_parquet(&parquet_path, &records)?;

    println!(
        "Wrote {} salary records to {csv_path} and {parquet_path}",
        records.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_records() {
        let a = generate(&mut ChaCha8Rng::seed_from_u64(7), 50);
        let b = generate(&mut ChaCha8Rng::seed_from_u64(7), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn records_use_known_categories() {
        let records = generate(&mut ChaCha8Rng::seed_from_u64(42), 200);
        for rec in &records {
            assert!(YEARS.contains(&rec.year));
            assert!(ROLES.iter().any(|(r, _)| *r == rec.role));
            assert!(COUNTRIES.iter().any(|(c, _)| *c == rec.country));
            assert!(rec.salary_usd > 0.0);
        }
    }
}
