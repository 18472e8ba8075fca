use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Comparison operators that are encoded into the field name as `<name>_<op>`
pub const COMPARE_OPERATORS: [&str; 6] = ["gt", "lt", "ge", "le", "like", "in"];

/// Declared type of a filter field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Date,
    Boolean,
    Number,
    Array,
    Tuple,
    /// Anything else; rendered as the default scalar type
    Unknown(String),
}

impl FieldType {
    /// Python type the generated filter uses for this field
    pub fn python_type(&self) -> &'static str {
        match self {
            FieldType::String => "str",
            FieldType::Date => "datetime",
            FieldType::Boolean => "bool",
            FieldType::Number => "int",
            FieldType::Array => "list",
            FieldType::Tuple => "tuple",
            FieldType::Unknown(_) => DEFAULT_DATATYPE,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "String",
            FieldType::Date => "Date",
            FieldType::Boolean => "Boolean",
            FieldType::Number => "Number",
            FieldType::Array => "Array",
            FieldType::Tuple => "Tuple",
            FieldType::Unknown(other) => other,
        }
    }
}

/// Datatype used when a field has no type or an unrecognized one
pub const DEFAULT_DATATYPE: &str = "str";

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "String" => FieldType::String,
            "Date" => FieldType::Date,
            "Boolean" => FieldType::Boolean,
            "Number" => FieldType::Number,
            "Array" => FieldType::Array,
            "Tuple" => FieldType::Tuple,
            _ => FieldType::Unknown(value),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        match value {
            FieldType::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// Comparison operator that is folded into the field name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Gt,
    Lt,
    Ge,
    Le,
    Like,
    In,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Gt => "gt",
            CompareOp::Lt => "lt",
            CompareOp::Ge => "ge",
            CompareOp::Le => "le",
            CompareOp::Like => "like",
            CompareOp::In => "in",
        }
    }

    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "gt" => Some(CompareOp::Gt),
            "lt" => Some(CompareOp::Lt),
            "ge" => Some(CompareOp::Ge),
            "le" => Some(CompareOp::Le),
            "like" => Some(CompareOp::Like),
            "in" => Some(CompareOp::In),
            _ => None,
        }
    }
}

/// Operator tag of a field descriptor (`op` in the source JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldOp {
    /// One of [`COMPARE_OPERATORS`]
    Compare(CompareOp),
    /// `..`, expanded into a `from`/`to` pair
    Range,
    /// `T`, filters on the whole object
    Whole,
    /// Lower bound produced by range expansion
    From,
    /// Upper bound produced by range expansion
    To,
    /// Equality or any other tag; passed through untouched
    Other(String),
}

impl FieldOp {
    pub fn as_str(&self) -> &str {
        match self {
            FieldOp::Compare(op) => op.as_str(),
            FieldOp::Range => "..",
            FieldOp::Whole => "T",
            FieldOp::From => "from",
            FieldOp::To => "to",
            FieldOp::Other(tag) => tag,
        }
    }
}

impl From<String> for FieldOp {
    fn from(value: String) -> Self {
        if let Some(op) = CompareOp::parse(&value) {
            return FieldOp::Compare(op);
        }
        match value.as_str() {
            ".." => FieldOp::Range,
            "T" => FieldOp::Whole,
            "from" => FieldOp::From,
            "to" => FieldOp::To,
            _ => FieldOp::Other(value),
        }
    }
}

impl From<FieldOp> for String {
    fn from(value: FieldOp) -> Self {
        match value {
            FieldOp::Other(tag) => tag,
            op => op.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filterable field of a filter entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field identifier; rewritten by preprocessing
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<FieldOp>,

    /// Related field names for operators that span several columns
    #[serde(rename = "fieldNames", default, skip_serializing_if = "Option::is_none")]
    pub field_names: Option<Vec<String>>,

    /// Set once the operator has been folded into the name
    #[serde(skip)]
    pub(crate) preprocessed: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            field_type: None,
            op: None,
            field_names: None,
            preprocessed: false,
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(FieldOp::from(op.into()));
        self
    }

    pub fn with_field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_preprocessed(&self) -> bool {
        self.preprocessed
    }
}

/// One filter definition: a target model, its ordering and its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntity {
    /// Display name of the generated filter class
    #[serde(default)]
    pub name: Option<String>,

    /// Target model; also names the output file
    #[serde(rename = "for", default)]
    pub target: Option<String>,

    /// Semicolon separated field names, `-` prefix for descending
    #[serde(rename = "orderBy", default)]
    pub order_by: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FilterEntity {
    /// Name used in console messages
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// Configuration for a generation run
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Python module the generated filters import their models from
    pub db_schema_location: String,

    /// Local fields fragment, relative to the working directory
    pub local_source_file: PathBuf,

    /// Merge the local fields fragment into the first entity
    pub load_local: bool,

    /// Directory to write generated filters to
    pub destination_dir: Option<PathBuf>,

    /// Used when `destination_dir` is unset or not a directory
    pub fallback_dir: PathBuf,

    /// Output file name prefix, followed by the lowercased target model
    pub file_prefix: String,

    /// Output file extension, without the dot
    pub file_extension: String,
}

impl GeneratorConfig {
    /// Output file name for a target model, e.g. `filter_class_user.py`
    pub fn file_name_for(&self, target: &str) -> String {
        format!(
            "{}{}.{}",
            self.file_prefix,
            target.to_lowercase(),
            self.file_extension
        )
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            db_schema_location: String::from("db.schema"),
            local_source_file: PathBuf::from("local_source/local_source.json"),
            load_local: false,
            destination_dir: None,
            fallback_dir: install_dir(),
            file_prefix: String::from("filter_class_"),
            file_extension: String::from("py"),
        }
    }
}

/// Directory of the running executable, or the working directory if that is unknown
fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
