//! The module responsible for the location record and the catalog of its fields.
//!

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of `status` in a successful ip-api answer.
pub const SUCCESS: &str = "success";

/// Describes one geolocation query result.
///
/// Field order matches the catalog order in [`FIELDS`]. String fields are
/// omitted from JSON when empty, numbers and flags are always written.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationInfo {
    /// Query outcome, `success` or `fail`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Failure reason when `status` is `fail`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub continent: String,
    #[serde(rename = "continentCode", skip_serializing_if = "String::is_empty")]
    pub continent_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(rename = "countryCode", skip_serializing_if = "String::is_empty")]
    pub country_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(rename = "regionName", skip_serializing_if = "String::is_empty")]
    pub region_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub district: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub zip: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub timezone: String,
    /// Offset in seconds from UTC.
    #[serde(rename = "offset")]
    pub timezone_offset: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub isp: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub org: String,
    #[serde(rename = "as", skip_serializing_if = "String::is_empty")]
    pub asn: String,
    pub mobile: bool,
    pub proxy: bool,
    /// Address the answer is about.
    #[serde(rename = "query", skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int,
    Float,
    Bool,
}

/// Borrowed value of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> FieldValue<'a> {
        FieldValue::Text(value)
    }
}

impl From<&i32> for FieldValue<'_> {
    fn from(value: &i32) -> Self {
        FieldValue::Int(i64::from(*value))
    }
}

impl From<&f64> for FieldValue<'_> {
    fn from(value: &f64) -> Self {
        FieldValue::Float(*value)
    }
}

impl From<&bool> for FieldValue<'_> {
    fn from(value: &bool) -> Self {
        FieldValue::Bool(*value)
    }
}

/// Plain text form used by the text renderer: floats keep 4 decimals.
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{:.4}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Static description of one [`LocationInfo`] field.
///
/// * `name` - Name used on the command line and in templates.
/// * `key` - Name in the ip-api payload and in JSON output.
/// * `selectable` - False for fields that only report the query outcome.
/// * `get` - Reads the field from a record.
/// * `copy` - Copies the field from the second record into the first.
pub struct Field {
    pub name: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
    pub selectable: bool,
    pub description: Option<&'static str>,
    pub example: Option<&'static str>,
    pub get: fn(&LocationInfo) -> FieldValue<'_>,
    pub copy: fn(&mut LocationInfo, &LocationInfo),
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("selectable", &self.selectable)
            .finish()
    }
}

macro_rules! field {
    (
        $name:literal,
        $key:literal,
        $member:ident,
        $kind:ident,
        $selectable:expr,
        $description:expr,
        $example:expr $(,)?
    ) => {
        Field {
            name: $name,
            key: $key,
            kind: FieldKind::$kind,
            selectable: $selectable,
            description: $description,
            example: $example,
            get: |info| FieldValue::from(&info.$member),
            copy: |target, source| target.$member = source.$member.clone(),
        }
    };
}

/// Every field of [`LocationInfo`] in declared order.
pub static FIELDS: &[Field] = &[
    field!("Status", "status", status, Text, false, None, None),
    field!("Message", "message", message, Text, false, None, None),
    field!(
        "Continent",
        "continent",
        continent,
        Text,
        true,
        Some("Full name of continent"),
        Some("North America"),
    ),
    field!(
        "ContinentCode",
        "continentCode",
        continent_code,
        Text,
        true,
        Some("Shorthand name of continent"),
        Some("NA"),
    ),
    field!(
        "Country",
        "country",
        country,
        Text,
        true,
        Some("Full name of country"),
        Some("United States"),
    ),
    field!(
        "CountryCode",
        "countryCode",
        country_code,
        Text,
        true,
        Some("Shorthand name of country"),
        Some("US"),
    ),
    field!(
        "Region",
        "region",
        region,
        Text,
        true,
        Some("Shorthand name of region, state, etc."),
        Some("CA"),
    ),
    field!(
        "RegionName",
        "regionName",
        region_name,
        Text,
        true,
        Some("Full name of region, state, etc."),
        Some("California"),
    ),
    field!("City", "city", city, Text, true, Some("Full name of city"), Some("San Francisco")),
    field!(
        "District",
        "district",
        district,
        Text,
        true,
        Some("Full name of city district"),
        Some("South of Market"),
    ),
    field!("ZIP", "zip", zip, Text, true, Some("Postal code"), Some("94103")),
    field!("Latitude", "lat", latitude, Float, true, None, None),
    field!("Longitude", "lon", longitude, Float, true, None, None),
    field!(
        "Timezone",
        "timezone",
        timezone,
        Text,
        true,
        Some("tzdata name of timezone"),
        Some("America/Los_Angeles"),
    ),
    field!(
        "TimezoneOffset",
        "offset",
        timezone_offset,
        Int,
        true,
        Some("Offset in seconds from UTC"),
        Some("-28800 for America/Los_Angeles"),
    ),
    field!(
        "ISP",
        "isp",
        isp,
        Text,
        true,
        Some("Name of ISP"),
        Some("Comcast Cable Communications, LLC"),
    ),
    field!(
        "ORG",
        "org",
        org,
        Text,
        true,
        Some("Organizational owner of IP, usually ISP"),
        Some("Comcast Cable Communications, Inc"),
    ),
    field!(
        "ASN",
        "as",
        asn,
        Text,
        true,
        Some("AS name and number for current IP"),
        Some("AS7922 Comcast Cable Communications, LLC"),
    ),
    field!(
        "Mobile",
        "mobile",
        mobile,
        Bool,
        true,
        Some("Whether or not you are on a mobile network"),
        None,
    ),
    field!("Proxy", "proxy", proxy, Bool, true, Some("Whether or not you are using a proxy"), None),
    field!("IP", "query", ip, Text, true, Some("Current IP address"), Some("0.0.0.0")),
];

/// Find a catalog field by its case-sensitive name.
pub fn field(name: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.name == name)
}

impl LocationInfo {
    /// Value of the field called `name`, selectable or not.
    pub fn value(&self, name: &str) -> Option<FieldValue<'_>> {
        field(name).map(|f| (f.get)(self))
    }

    /// True when the upstream API reported a successful query.
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS
    }
}
