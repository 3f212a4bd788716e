use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Dimension – the four categorical filter axes
// ---------------------------------------------------------------------------

/// A categorical column the user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl Dimension {
    /// All dimensions in sidebar order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::Contract,
        Dimension::CompanySize,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Year => "Ano",
            Dimension::Seniority => "Senioridade",
            Dimension::Contract => "Tipo de Contrato",
            Dimension::CompanySize => "Porte da Empresa",
        }
    }

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Year => "ano",
            Dimension::Seniority => "senioridade",
            Dimension::Contract => "contrato",
            Dimension::CompanySize => "tamanho_empresa",
        }
    }
}

// ---------------------------------------------------------------------------
// DimensionValue – a single cell in a filter column
// ---------------------------------------------------------------------------

/// Value of a record along one [`Dimension`].
/// Years compare numerically, everything else lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionValue {
    Year(i32),
    Text(String),
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Year(y) => write!(f, "{y}"),
            DimensionValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for DimensionValue {
    fn from(year: i32) -> Self {
        DimensionValue::Year(year)
    }
}

impl From<&str> for DimensionValue {
    fn from(s: &str) -> Self {
        DimensionValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single salary observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "remoto")]
    pub remote: String,
    /// Annual salary converted to USD.
    #[serde(rename = "salario_anual_conv_usd")]
    pub salary_usd: f64,
    /// ISO3 country code of residence.
    #[serde(rename = "residencia_iso3", default, deserialize_with = "null_as_empty")]
    pub country: String,
}

/// Reads a nullable string column, mapping null to `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SalaryRecord {
    /// The record's value along `dim`.
    pub fn value(&self, dim: Dimension) -> DimensionValue {
        match dim {
            Dimension::Year => DimensionValue::Year(self.year),
            Dimension::Seniority => DimensionValue::Text(self.seniority.clone()),
            Dimension::Contract => DimensionValue::Text(self.contract.clone()),
            Dimension::CompanySize => DimensionValue::Text(self.company_size.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed per-dimension value sets.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    /// All records, in file order.
    pub records: Vec<SalaryRecord>,
    /// For each dimension the sorted set of observed values.
    pub unique_values: BTreeMap<Dimension, BTreeSet<DimensionValue>>,
}

impl SalaryDataset {
    /// Build dimension indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<DimensionValue>> = Dimension::ALL
            .iter()
            .map(|&dim| (dim, BTreeSet::new()))
            .collect();

        for rec in &records {
            for dim in Dimension::ALL {
                unique_values.entry(dim).or_default().insert(rec.value(dim));
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    /// Observed values for one dimension.
    pub fn values(&self, dim: Dimension) -> Option<&BTreeSet<DimensionValue>> {
        self.unique_values.get(&dim)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        year: i32,
        seniority: &str,
        company_size: &str,
        role: &str,
        salary_usd: f64,
        country: &str,
    ) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: seniority.to_string(),
            contract: "CLT".to_string(),
            company_size: company_size.to_string(),
            role: role.to_string(),
            remote: "Remote".to_string(),
            salary_usd,
            country: country.to_string(),
        }
    }

    #[test]
    fn unique_values_are_sorted_per_dimension() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "Senior", "Large", "Data Scientist", 1.0, "USA"),
            record(2021, "Junior", "Small", "Analyst", 2.0, "BRA"),
            record(2024, "Senior", "Medium", "Analyst", 3.0, "BRA"),
        ]);

        let years: Vec<_> = ds.values(Dimension::Year).unwrap().iter().cloned().collect();
        assert_eq!(years, vec![DimensionValue::Year(2021), DimensionValue::Year(2024)]);

        let sizes: Vec<String> = ds
            .values(Dimension::CompanySize)
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(sizes, vec!["Large", "Medium", "Small"]);
    }

    #[test]
    fn empty_dataset_still_has_every_dimension() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for dim in Dimension::ALL {
            assert!(ds.values(dim).unwrap().is_empty());
        }
    }

    #[test]
    fn years_order_numerically() {
        assert!(DimensionValue::Year(999) < DimensionValue::Year(2020));
    }
}
