//! Column derivation.
//!
//! Walks an object type's fields in declaration order and produces one
//! column per reachable SCALAR or ENUM field. Lists of scalars are a single
//! column as well. OBJECT fields are expanded in place, their columns
//! prefixed with the field name; lists of objects have no column, matching
//! the flattener, which drops them. Everything else is skipped and reported
//! in [`Derivation::skipped`].

use indexmap::IndexMap;

use crate::{
    ColumnPath, Error, Result, Schema, SkipReason, Skipped, TypeDefinition, TypeKind,
    resolve::unwrap,
    walk::{Shape, Step, Visitor, walk},
};

/// SQL type of a derived column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlType {
    #[default]
    Text,
}

impl SqlType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
        }
    }
}

/// One derived output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    path: ColumnPath,
    name: String,
    sql_type: SqlType,
}

impl ColumnSpec {
    pub fn new(path: ColumnPath, sql_type: SqlType) -> Self {
        let name = path.flat_name();
        Self {
            path,
            name,
            sql_type,
        }
    }

    /// The flat column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &ColumnPath {
        &self.path
    }

    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }
}

/// Ordered set of columns, unique by flat name.
///
/// Order is traversal order and is the positional order of the table's
/// columns and of every INSERT's values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    specs: IndexMap<String, ColumnSpec>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Returns false, leaving the set unchanged, if a column
    /// with the same flat name already exists.
    pub fn push(&mut self, spec: ColumnSpec) -> bool {
        if self.specs.contains_key(spec.name()) {
            return false;
        }
        self.specs.insert(spec.name().to_string(), spec);
        true
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.specs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.specs.values()
    }

    /// Flat column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl FromIterator<ColumnSpec> for Columns {
    fn from_iter<I: IntoIterator<Item = ColumnSpec>>(iter: I) -> Self {
        let mut columns = Columns::new();
        for spec in iter {
            columns.push(spec);
        }
        columns
    }
}

impl<'c> IntoIterator for &'c Columns {
    type Item = &'c ColumnSpec;
    type IntoIter = indexmap::map::Values<'c, String, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.values()
    }
}

/// The result of deriving columns for a root type.
#[derive(Debug, Clone)]
pub struct Derivation {
    /// The root type name.
    pub type_name: String,
    /// Derived columns, never empty.
    pub columns: Columns,
    /// Fields that produced no column.
    pub skipped: Vec<Skipped>,
}

/// Derives the flat column set of an object type.
///
/// # Example
///
/// ```ignore
/// let derivation = Deriver::new(&schema).max_depth(Some(2)).derive("Country")?;
/// for column in &derivation.columns {
///     println!("{} {}", column.name(), column.sql_type().as_str());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Deriver<'a> {
    schema: &'a Schema,
    max_depth: Option<usize>,
    prefix: ColumnPath,
}

impl<'a> Deriver<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            max_depth: None,
            prefix: ColumnPath::root(),
        }
    }

    /// Limit how many object levels below the root are expanded.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Prefix every column name with `prefix` and the separator.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = if prefix.is_empty() {
            ColumnPath::root()
        } else {
            ColumnPath::root().child(prefix)
        };
        self
    }

    /// Derive the columns of `type_name`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::TypeNotFound`] if the root type is not in the
    /// schema and with [`Error::NoColumnsDerived`] if no field yields a
    /// column. Problems below the root only skip the affected subtree.
    pub fn derive(&self, type_name: &str) -> Result<Derivation> {
        let definition = self.schema.type_definition(type_name)?;
        let root = TypeNode {
            schema: self.schema,
            definition,
            ancestors: vec![definition.name.as_str()],
            max_depth: self.max_depth,
        };

        let mut collector = Collector::default();
        walk(&root, &self.prefix, &mut collector);

        if collector.columns.is_empty() {
            return Err(Error::NoColumnsDerived {
                type_name: type_name.to_string(),
            });
        }

        tracing::debug!(
            type_name,
            columns = collector.columns.len(),
            skipped = collector.skipped.len(),
            "derived columns"
        );

        Ok(Derivation {
            type_name: type_name.to_string(),
            columns: collector.columns,
            skipped: collector.skipped,
        })
    }
}

/// Derive the columns of `type_name` with default options.
pub fn derive_columns(schema: &Schema, type_name: &str) -> Result<Columns> {
    Deriver::new(schema)
        .derive(type_name)
        .map(|derivation| derivation.columns)
}

/// An object type positioned in the traversal.
struct TypeNode<'a> {
    schema: &'a Schema,
    definition: &'a TypeDefinition,
    /// Object types from the root down to this one.
    ancestors: Vec<&'a str>,
    max_depth: Option<usize>,
}

impl<'a> TypeNode<'a> {
    fn classify(&self, field: &'a crate::Field) -> Step<SqlType, Self> {
        let Some(named) = unwrap(&field.ty) else {
            return Step::Skip(SkipReason::Unresolvable);
        };
        let Some(name) = named.name.as_deref() else {
            return Step::Skip(SkipReason::Unresolvable);
        };

        match named.kind {
            TypeKind::Scalar | TypeKind::Enum => Step::Leaf(SqlType::Text),
            TypeKind::Object if field.ty.is_list() => Step::Skip(SkipReason::ObjectList),
            TypeKind::Object => self.descend(name),
            kind => Step::Skip(SkipReason::UnsupportedKind(kind)),
        }
    }

    fn descend(&self, name: &'a str) -> Step<SqlType, Self> {
        if self.ancestors.contains(&name) {
            return Step::Skip(SkipReason::Cycle(name.to_string()));
        }
        if let Some(max) = self.max_depth
            && self.ancestors.len() > max
        {
            return Step::Skip(SkipReason::DepthLimit(max));
        }

        match self.schema.get(name) {
            Some(definition) => {
                let mut ancestors = self.ancestors.clone();
                ancestors.push(name);
                Step::Object(TypeNode {
                    schema: self.schema,
                    definition,
                    ancestors,
                    max_depth: self.max_depth,
                })
            }
            None => Step::Skip(SkipReason::TypeNotFound(name.to_string())),
        }
    }
}

impl<'a> Shape<'a> for TypeNode<'a> {
    type Leaf = SqlType;

    fn steps(&self) -> Vec<(&'a str, Step<SqlType, Self>)> {
        self.definition
            .fields
            .iter()
            .map(|field| (field.name.as_str(), self.classify(field)))
            .collect()
    }
}

#[derive(Default)]
struct Collector {
    columns: Columns,
    skipped: Vec<Skipped>,
}

impl Visitor<SqlType> for Collector {
    fn leaf(&mut self, path: &ColumnPath, sql_type: SqlType) {
        if !self.columns.push(ColumnSpec::new(path.clone(), sql_type)) {
            self.skip(path, SkipReason::DuplicateColumn);
        }
    }

    fn skip(&mut self, path: &ColumnPath, reason: SkipReason) {
        match &reason {
            SkipReason::TypeNotFound(_) | SkipReason::DuplicateColumn => {
                tracing::warn!(field = %path, %reason, "skipping field");
            }
            _ => tracing::debug!(field = %path, %reason, "skipping field"),
        }
        self.skipped.push(Skipped::new(path.clone(), reason));
    }
}
