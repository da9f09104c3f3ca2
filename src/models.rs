use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::schema::beer;

// Validate is derived without any field rules: the entity is structurally
// validated only, matching the service's contract that nothing rejects an
// empty name or an out-of-range abv.

/// The closed set of beer categories. Stored in the database as the
/// symbolic name, which is also the wire form (`"ALE"`, `"IPA"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerType {
    #[default]
    Ale,
    Lager,
    Stout,
    Porter,
    Pilsner,
    Wheat,
    Ipa,
}

impl BeerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BeerType::Ale => "ALE",
            BeerType::Lager => "LAGER",
            BeerType::Stout => "STOUT",
            BeerType::Porter => "PORTER",
            BeerType::Pilsner => "PILSNER",
            BeerType::Wheat => "WHEAT",
            BeerType::Ipa => "IPA",
        }
    }
}

impl fmt::Display for BeerType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALE" => Ok(BeerType::Ale),
            "LAGER" => Ok(BeerType::Lager),
            "STOUT" => Ok(BeerType::Stout),
            "PORTER" => Ok(BeerType::Porter),
            "PILSNER" => Ok(BeerType::Pilsner),
            "WHEAT" => Ok(BeerType::Wheat),
            "IPA" => Ok(BeerType::Ipa),
            other => Err(format!("unrecognized beer type: {}", other)),
        }
    }
}

impl ToSql<Text, Pg> for BeerType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for BeerType {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        std::str::from_utf8(value.as_bytes())?.parse().map_err(Into::into)
    }
}

/// A beer record. The id is assigned by the caller (it arrives in the
/// request path), not generated by the store.
///
/// Deserialization falls back to the sentinel defaults for absent body
/// fields, so a partial POST body produces a well-formed record.
#[derive(
    Debug, Clone, PartialEq, Deserialize, Validate, Queryable, Insertable, AsChangeset,
)]
#[diesel(table_name = beer)]
#[serde(default)]
pub struct Beer {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: BeerType,
    #[serde(rename = "brewerId")]
    pub brewer_id: i32,
    pub abv: f64,
}

impl Default for Beer {
    fn default() -> Beer {
        Beer {
            id: 0,
            name: "{ beer name }".into(),
            type_: BeerType::Ale,
            brewer_id: 0,
            abv: 10.0,
        }
    }
}

impl Beer {
    pub fn builder() -> BeerBuilder {
        BeerBuilder::default()
    }
}

impl fmt::Display for Beer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Beer {{ id = '{}', name = '{}', type = '{}', brewer_id = '{}', abv = '{}' }}",
            self.id, self.name, self.type_, self.brewer_id, self.abv
        )
    }
}

/// Fluent constructor for `Beer`, mainly for tests and callers that
/// assemble records field by field. Starts zero-valued, not from the
/// sentinel defaults.
#[derive(Debug, Default)]
pub struct BeerBuilder {
    id: i32,
    name: String,
    type_: BeerType,
    brewer_id: i32,
    abv: f64,
}

impl BeerBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn type_(mut self, type_: BeerType) -> Self {
        self.type_ = type_;
        self
    }

    pub fn brewer_id(mut self, brewer_id: i32) -> Self {
        self.brewer_id = brewer_id;
        self
    }

    pub fn abv(mut self, abv: f64) -> Self {
        self.abv = abv;
        self
    }

    pub fn build(self) -> Beer {
        Beer {
            id: self.id,
            name: self.name,
            type_: self.type_,
            brewer_id: self.brewer_id,
            abv: self.abv,
        }
    }
}
