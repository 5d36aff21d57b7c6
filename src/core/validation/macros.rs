//! Declarative validator definitions

/// Build a [`ValidatorDefinition`](crate::core::validation::ValidatorDefinition)
/// from a static table of fields
///
/// Each field is `name: Type [options]`, where `Type` is a
/// [`FieldType`](crate::core::field::FieldType) variant and options are
/// `required`, `optional`, rules and filters, in the order they should run.
/// Expands to `Result<ValidatorDefinition, ConfigError>`.
///
/// # Example
///
/// ```rust,ignore
/// use params::prelude::*;
///
/// let create_invoice = define_validator!("create_invoice", {
///     number: String [required, trim, uppercase, string_length(3, 50)],
///     amount: Float [required, round_decimals(2), positive],
///     status: String [in_list("draft", "sent")],
///     contact: String [email],
/// })?;
/// ```
#[macro_export]
macro_rules! define_validator {
    (
        $name:expr,
        {
            $( $field:ident : $ty:ident [ $( $option:tt )* ] ),* $(,)?
        }
    ) => {
        $crate::core::validation::ValidatorDefinition::define(
            $name,
            ::std::vec![
                $(
                    $crate::add_field_options!(
                        $crate::core::validation::FieldSpec::new(
                            stringify!($field),
                            $crate::core::field::FieldType::$ty,
                        ),
                        $( $option )*
                    )
                ),*
            ],
        )
    };
}

/// Helper macro applying `define_validator!` options to a `FieldSpec`
#[macro_export]
macro_rules! add_field_options {
    // Base case: nothing left
    ($spec:expr $(,)?) => {
        $spec
    };

    // Separator
    ($spec:expr, , $( $rest:tt )*) => {
        $crate::add_field_options!($spec, $( $rest )*)
    };

    // === presence ===

    ($spec:expr, required $( $rest:tt )*) => {
        $crate::add_field_options!($spec.required() $( $rest )*)
    };

    ($spec:expr, optional $( $rest:tt )*) => {
        $crate::add_field_options!($spec.optional() $( $rest )*)
    };

    // === rules ===

    ($spec:expr, positive $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::positive()) $( $rest )*
        )
    };

    ($spec:expr, string_length($min:expr, $max:expr) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::string_length($min, $max))
            $( $rest )*
        )
    };

    ($spec:expr, min_value($min:expr) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::min_value($min)) $( $rest )*
        )
    };

    ($spec:expr, max_value($max:expr) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::max_value($max)) $( $rest )*
        )
    };

    ($spec:expr, in_list($( $value:expr ),* $(,)?) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::in_list(
                ::std::vec![$( ::std::string::ToString::to_string(&$value) ),*]
            ))
            $( $rest )*
        )
    };

    ($spec:expr, date_format($format:expr) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::date_format($format)) $( $rest )*
        )
    };

    ($spec:expr, email $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::email()) $( $rest )*
        )
    };

    ($spec:expr, url $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::url()) $( $rest )*
        )
    };

    ($spec:expr, uuid $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::uuid()) $( $rest )*
        )
    };

    ($spec:expr, phone $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::phone()) $( $rest )*
        )
    };

    ($spec:expr, pattern($regex:expr) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.rule($crate::core::validation::validators::pattern($regex)) $( $rest )*
        )
    };

    // Any prebuilt Rule
    ($spec:expr, rule($rule:expr) $( $rest:tt )*) => {
        $crate::add_field_options!($spec.rule($rule) $( $rest )*)
    };

    // === filters ===

    ($spec:expr, trim $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.filter($crate::core::validation::filters::trim()) $( $rest )*
        )
    };

    ($spec:expr, uppercase $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.filter($crate::core::validation::filters::uppercase()) $( $rest )*
        )
    };

    ($spec:expr, lowercase $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.filter($crate::core::validation::filters::lowercase()) $( $rest )*
        )
    };

    ($spec:expr, round_decimals($decimals:expr) $( $rest:tt )*) => {
        $crate::add_field_options!(
            $spec.filter($crate::core::validation::filters::round_decimals($decimals))
            $( $rest )*
        )
    };
}
