/// A named schema namespace.
///
/// Packages arrive from the schema loader already validated; [`decorate`]
/// fills in the derived naming before any code is emitted.
#[derive(Debug, Clone)]
pub struct Package {
    /// Full package name, segments separated by `/`
    pub name: String,
    /// Short name used in the generated source, derived by [`decorate`]
    pub name_native: String,
    /// Struct definitions in declaration order
    pub structs: Vec<Struct>,
}

/// A named record within a package.
#[derive(Debug, Clone)]
pub struct Struct {
    /// Exporter-cased identifier as it appears in the generated source
    pub name: String,
    /// Fields in declaration order; the position is the wire tag index
    pub fields: Vec<Field>,
}

/// A typed, indexed slot inside a struct.
#[derive(Debug, Clone)]
pub struct Field {
    /// Identifier as it appears in the generated source
    pub name: String,
    /// 0-based declaration position, the low 7 bits of the wire tag.
    /// Valid indices are 0..=126; 127 is the struct terminator.
    pub index: u8,
    pub kind: Type,
    /// Native type name in the generated source, derived by [`decorate`]
    pub type_native: String,
}

/// Position of a struct definition in the schema: package position in the
/// package list, then struct position within that package.
///
/// References across packages are plain index pairs; nothing is owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructRef {
    pub pkg: usize,
    pub index: usize,
}

/// Canonical field types of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Bool,
    Uint32,
    Uint64,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Seconds since the epoch with an optional nanosecond count
    Timestamp,
    /// UTF-8 string
    Text,
    /// Raw byte sequence
    Binary,
    /// Reference to another schema struct, or an ordered sequence of such
    /// references when `array` is set. The schema language permits arrays
    /// of struct references only.
    Ref { to: StructRef, array: bool },
}

/// Populates the derived naming of `pkgs` in place: each package's short
/// name (the final `/`-separated segment) and each field's native type
/// name. Struct references resolve to the referenced struct's name,
/// qualified with the referent's package short name when the referent
/// lives in another package.
///
/// Idempotent. Runs before emission; [`crate::generate`] calls it on
/// entry. Referenced structs must exist; the schema validator guarantees
/// resolution before packages reach this crate.
pub fn decorate(pkgs: &mut [Package]) {
    for p in pkgs.iter_mut() {
        p.name_native = p.name.rsplit('/').next().unwrap_or(p.name.as_str()).to_string();
    }

    // name lookups for struct references
    let short_names: Vec<String> = pkgs.iter().map(|p| p.name_native.clone()).collect();
    let struct_names: Vec<Vec<String>> = pkgs
        .iter()
        .map(|p| p.structs.iter().map(|s| s.name.clone()).collect())
        .collect();

    for (at, p) in pkgs.iter_mut().enumerate() {
        for s in &mut p.structs {
            for f in &mut s.fields {
                f.type_native = match f.kind {
                    Type::Bool => "bool".to_string(),
                    Type::Uint32 => "uint32".to_string(),
                    Type::Uint64 => "uint64".to_string(),
                    Type::Int32 => "int32".to_string(),
                    Type::Int64 => "int64".to_string(),
                    Type::Float32 => "float32".to_string(),
                    Type::Float64 => "float64".to_string(),
                    Type::Timestamp => "time.Time".to_string(),
                    Type::Text => "string".to_string(),
                    Type::Binary => "[]byte".to_string(),
                    Type::Ref { to, .. } => {
                        let name = &struct_names[to.pkg][to.index];
                        if to.pkg == at {
                            name.clone()
                        } else {
                            format!("{}.{}", short_names[to.pkg], name)
                        }
                    }
                };
            }
        }
    }
}

#[cfg(test)]
fn field(name: &str, index: u8, kind: Type) -> Field {
    Field {
        name: name.to_string(),
        index,
        kind,
        type_native: String::new(),
    }
}

#[cfg(test)]
fn sample_schema() -> Vec<Package> {
    vec![
        Package {
            name: "demo/api".to_string(),
            name_native: String::new(),
            structs: vec![
                Struct {
                    name: "Course".to_string(),
                    fields: vec![
                        field("Open", 0, Type::Bool),
                        field("Since", 1, Type::Timestamp),
                        field("Title", 2, Type::Text),
                        field("Raw", 3, Type::Binary),
                        field(
                            "Meta",
                            4,
                            Type::Ref {
                                to: StructRef { pkg: 1, index: 0 },
                                array: false,
                            },
                        ),
                        field(
                            "Lessons",
                            5,
                            Type::Ref {
                                to: StructRef { pkg: 0, index: 1 },
                                array: true,
                            },
                        ),
                    ],
                },
                Struct {
                    name: "Lesson".to_string(),
                    fields: vec![field("Seats", 0, Type::Uint32)],
                },
            ],
        },
        Package {
            name: "common".to_string(),
            name_native: String::new(),
            structs: vec![Struct {
                name: "Meta".to_string(),
                fields: vec![field("Rank", 0, Type::Int64)],
            }],
        },
    ]
}

#[test]
fn test_decorate_names() {
    let mut pkgs = sample_schema();
    decorate(&mut pkgs);

    assert_eq!("api", pkgs[0].name_native);
    assert_eq!("common", pkgs[1].name_native);

    let natives: Vec<&str> = pkgs[0].structs[0]
        .fields
        .iter()
        .map(|f| f.type_native.as_str())
        .collect();
    assert_eq!(
        vec!["bool", "time.Time", "string", "[]byte", "common.Meta", "Lesson"],
        natives
    );
    assert_eq!("uint32", pkgs[0].structs[1].fields[0].type_native);
    assert_eq!("int64", pkgs[1].structs[0].fields[0].type_native);
}

#[test]
fn test_decorate_qualifies_foreign_refs_only() {
    let mut pkgs = sample_schema();
    decorate(&mut pkgs);

    // same package: bare name; other package: short-name qualified
    assert_eq!("Lesson", pkgs[0].structs[0].fields[5].type_native);
    assert_eq!("common.Meta", pkgs[0].structs[0].fields[4].type_native);
}

#[test]
fn test_decorate_idempotent() {
    let mut once = sample_schema();
    decorate(&mut once);
    let mut twice = once.clone();
    decorate(&mut twice);

    for (a, b) in once.iter().zip(&twice) {
        assert_eq!(a.name_native, b.name_native);
        for (sa, sb) in a.structs.iter().zip(&b.structs) {
            for (fa, fb) in sa.fields.iter().zip(&sb.fields) {
                assert_eq!(fa.type_native, fb.type_native);
            }
        }
    }
}

#[test]
fn test_decorate_single_segment_name() {
    let mut pkgs = vec![Package {
        name: "solo".to_string(),
        name_native: String::new(),
        structs: Vec::new(),
    }];
    decorate(&mut pkgs);
    assert_eq!("solo", pkgs[0].name_native);
}
