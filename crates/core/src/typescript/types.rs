//! TypeScript type expressions.

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Record type: Record<K, V>
    Record {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// Named type reference: "UserProfile", "Date", "T"
    Ref(String),
    /// Generic instantiation: PagedResult<UserProfile>
    Generic {
        /// Generic type name.
        name: String,
        /// Type arguments in order.
        arguments: Vec<TsType>,
    },
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `void`
    Void,
}

impl TsType {
    /// Shorthand for the `null` marker type.
    pub fn null() -> Self {
        TsType::Primitive(TsPrimitive::Null)
    }

    /// Whether this type already admits `null`.
    pub fn is_nullable(&self) -> bool {
        match self {
            TsType::Primitive(TsPrimitive::Null) => true,
            TsType::Union(types) => types.iter().any(TsType::is_nullable),
            _ => false,
        }
    }

    /// Union this type with `null`, unless it already admits it.
    pub fn or_null(self) -> Self {
        if self.is_nullable() {
            return self;
        }
        match self {
            TsType::Union(mut types) => {
                types.push(TsType::null());
                TsType::Union(types)
            }
            other => TsType::Union(vec![other, TsType::null()]),
        }
    }
}
