use serde::Deserialize;

/// A top-level administrative region (a Brazilian state).
///
/// Identified by its two-letter UF code (e.g. "SP"). The code is stable
/// and immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: String,
}

/// A city, scoped to exactly one region.
///
/// City names are display names; they are not unique across regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub name: String,
}

/// Wire record for one state in the IBGE `/estados` response.
///
/// The API returns more fields (id, full name, parent region); only the
/// UF code is used.
#[derive(Debug, Deserialize)]
pub(crate) struct RegionRecord {
    pub sigla: String,
}

/// Wire record for one city in the IBGE `/estados/{uf}/municipios` response.
#[derive(Debug, Deserialize)]
pub(crate) struct CityRecord {
    pub nome: String,
}

impl From<RegionRecord> for Region {
    fn from(record: RegionRecord) -> Self {
        Self {
            code: record.sigla,
        }
    }
}

impl From<CityRecord> for City {
    fn from(record: CityRecord) -> Self {
        Self { name: record.nome }
    }
}
