//! Declarative registration of hydratable types.

/// Implements [`Hydratable`](crate::Hydratable) for a struct by listing its
/// bindable fields, their value types and optional column aliases.
///
/// Fields listed without aliases bind to the column of the same name. Fields
/// listed with `=> [..]` bind only to the given columns.
///
/// ```ignore
/// #[derive(Debug, Default)]
/// struct Annotated {
///     field0: i32,
///     att1: Option<String>,
///     att2: f64,
/// }
///
/// hydratable! {
///     Annotated {
///         field0: i32,
///         att1: Option<String> => ["field1", "field3"],
///         att2: f64 => ["field2"],
///     }
/// }
/// ```
#[macro_export]
macro_rules! hydratable {
    (
        $target:ident {
            $( $field:ident : $ty:ty $( => [ $( $alias:literal ),+ $(,)? ] )? ),* $(,)?
        }
    ) => {
        impl $crate::Hydratable for $target {
            fn schema() -> $crate::Result<$crate::TypeSchema<Self>> {
                $crate::TypeSchema::builder(stringify!($target))
                    $(
                        .field(
                            $crate::FieldSchema::new(
                                stringify!($field),
                                |target: &mut $target, value: $ty| target.$field = value,
                            )
                            $( .aliases([ $( $alias ),+ ]) )?
                        )
                    )*
                    .build()
            }
        }
    };
}
