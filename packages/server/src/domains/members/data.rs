use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::MemberId;

/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    pub name: String,
    pub remark: String,
}

impl MemberInput {
    /// Trims the name and rejects it when blank. A missing remark becomes "".
    pub fn new(name: Option<&str>, remark: Option<&str>) -> Option<Self> {
        let name = name.map(str::trim).filter(|n| !n.is_empty())?;
        Some(Self {
            name: name.to_string(),
            remark: remark.unwrap_or_default().to_string(),
        })
    }
}

/// One row of a bulk import. Rows with an id update that member, rows
/// without one insert a new member.
///
/// The id may arrive as a number or a numeric string. `0`, `""`, `false`
/// and `null` all count as no id.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberImportRow {
    #[serde(default, deserialize_with = "import_id")]
    pub id: Option<MemberId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawImportId {
    Int(i64),
    Text(String),
    Flag(bool),
}

fn import_id<'de, D>(deserializer: D) -> Result<Option<MemberId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawImportId>::deserialize(deserializer)? {
        None | Some(RawImportId::Int(0)) | Some(RawImportId::Flag(false)) => Ok(None),
        Some(RawImportId::Int(id)) => Ok(Some(MemberId::new(id))),
        Some(RawImportId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(|id| Some(MemberId::new(id)))
                .map_err(|_| D::Error::custom(format!("id must be an integer, got {:?}", text)))
        }
        Some(RawImportId::Flag(true)) => Err(D::Error::custom("id must be an integer")),
    }
}

/// Per-row outcome of a bulk import
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: u32,
    pub updated: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub(crate) fn fail(&mut self, row: usize, reason: impl std::fmt::Display) {
        self.failed += 1;
        self.errors.push(format!("row {}: {}", row, reason));
    }
}
