//! Core types used throughout tablegen
//!
//! This module contains the storage type enumeration understood by the SQL
//! generator, the scalar field types used in generated models, and the
//! [`TypeMap`] that links the two.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

// ============================================================================
// Storage Types
// ============================================================================

/// Database column types supported by the generator (MySQL spelling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageType {
    TinyIntUnsigned,
    TinyInt,
    SmallIntUnsigned,
    SmallInt,
    IntUnsigned,
    Int,
    BigIntUnsigned,
    BigInt,
    /// Fixed-length character column
    Char,
    /// Variable-length character column
    Varchar,
}

impl StorageType {
    /// Get the SQL spelling of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::TinyIntUnsigned => "tinyint unsigned",
            StorageType::TinyInt => "tinyint",
            StorageType::SmallIntUnsigned => "smallint unsigned",
            StorageType::SmallInt => "smallint",
            StorageType::IntUnsigned => "int unsigned",
            StorageType::Int => "int",
            StorageType::BigIntUnsigned => "bigint unsigned",
            StorageType::BigInt => "bigint",
            StorageType::Char => "char",
            StorageType::Varchar => "varchar",
        }
    }

    /// Character types render with an explicit `(size)` and never keep
    /// their literal default value
    pub fn is_character(&self) -> bool {
        matches!(self, StorageType::Char | StorageType::Varchar)
    }

    /// Get all storage types
    pub fn all() -> &'static [StorageType] {
        &[
            StorageType::TinyIntUnsigned,
            StorageType::TinyInt,
            StorageType::SmallIntUnsigned,
            StorageType::SmallInt,
            StorageType::IntUnsigned,
            StorageType::Int,
            StorageType::BigIntUnsigned,
            StorageType::BigInt,
            StorageType::Char,
            StorageType::Varchar,
        ]
    }
}

impl FromStr for StorageType {
    type Err = EngineError;

    /// Exact, case-sensitive match against the SQL spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageType::all()
            .iter()
            .copied()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| EngineError::UnknownStorageType(s.to_string()))
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Scalar Types
// ============================================================================

/// Scalar type of a field in a generated model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    String,
}

impl ScalarType {
    /// Convert to Rust type string
    pub fn to_rust_type(&self) -> &'static str {
        match self {
            ScalarType::U8 => "u8",
            ScalarType::I8 => "i8",
            ScalarType::U16 => "u16",
            ScalarType::I16 => "i16",
            ScalarType::U32 => "u32",
            ScalarType::I32 => "i32",
            ScalarType::U64 => "u64",
            ScalarType::I64 => "i64",
            ScalarType::String => "String",
        }
    }

    /// Convert to Go type string
    pub fn to_go_type(&self) -> &'static str {
        match self {
            ScalarType::U8 => "uint8",
            ScalarType::I8 => "int8",
            ScalarType::U16 => "uint16",
            ScalarType::I16 => "int16",
            ScalarType::U32 => "uint32",
            ScalarType::I32 => "int32",
            ScalarType::U64 => "uint64",
            ScalarType::I64 => "int64",
            ScalarType::String => "string",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_rust_type())
    }
}

// ============================================================================
// TypeMap
// ============================================================================

/// Mapping from storage types to model scalar types.
///
/// Built once at startup and handed to the schema loader; there is no way to
/// change a map after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    entries: BTreeMap<StorageType, ScalarType>,
}

impl TypeMap {
    /// The standard MySQL mapping covering every [`StorageType`]
    pub fn standard() -> Self {
        Self::from_entries([
            (StorageType::TinyIntUnsigned, ScalarType::U8),
            (StorageType::TinyInt, ScalarType::I8),
            (StorageType::SmallIntUnsigned, ScalarType::U16),
            (StorageType::SmallInt, ScalarType::I16),
            (StorageType::IntUnsigned, ScalarType::U32),
            (StorageType::Int, ScalarType::I32),
            (StorageType::BigIntUnsigned, ScalarType::U64),
            (StorageType::BigInt, ScalarType::I64),
            (StorageType::Char, ScalarType::String),
            (StorageType::Varchar, ScalarType::String),
        ])
    }

    /// Build a map from an explicit set of entries
    pub fn from_entries(entries: impl IntoIterator<Item = (StorageType, ScalarType)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resolve a storage type name to its storage type and scalar type.
    ///
    /// Names outside the enumeration, and enumeration members absent from
    /// this map, are both reported as [`EngineError::UnknownStorageType`].
    pub fn lookup(&self, name: &str) -> EngineResult<(StorageType, ScalarType)> {
        let storage: StorageType = name.parse()?;
        self.entries
            .get(&storage)
            .map(|scalar| (storage, *scalar))
            .ok_or_else(|| EngineError::UnknownStorageType(name.to_string()))
    }

    /// Scalar type for an already-resolved storage type
    pub fn scalar_for(&self, storage: StorageType) -> Option<ScalarType> {
        self.entries.get(&storage).copied()
    }

    /// Check whether the map knows the given storage type name
    pub fn supports(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Iterate entries in storage type order
    pub fn iter(&self) -> impl Iterator<Item = (StorageType, ScalarType)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================
