//! Field-name to column-label casing.

/// Converts a camelCase or PascalCase name to snake_case, one character at a
/// time: the first character is lowercased, every later uppercase character
/// becomes `_` plus its lowercase, everything else passes through.
///
/// Consecutive capitals are split individually, so `"UserID"` becomes
/// `"user_i_d"`. That behavior is part of the contract: derived column
/// labels in existing schemas depend on it, so it must not be replaced with
/// acronym-aware casing. Empty input yields an empty string.
///
/// ```
/// use rowcast_core::camel_to_snake;
///
/// assert_eq!(camel_to_snake("UserName"), "user_name");
/// assert_eq!(camel_to_snake("UserID"), "user_i_d");
/// assert_eq!(camel_to_snake("createdAt"), "created_at");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
    }
    for c in chars {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_camel_case() {
        assert_eq!(camel_to_snake("userName"), "user_name");
        assert_eq!(camel_to_snake("createdAt"), "created_at");
    }

    #[test]
    fn pascal_case_lowercases_the_first_character() {
        assert_eq!(camel_to_snake("UserName"), "user_name");
        assert_eq!(camel_to_snake("Id"), "id");
    }

    #[test]
    fn consecutive_capitals_split_individually() {
        assert_eq!(camel_to_snake("UserID"), "user_i_d");
        assert_eq!(camel_to_snake("ABC"), "a_b_c");
        assert_eq!(camel_to_snake("parseHTTPResponse"), "parse_h_t_t_p_response");
    }

    #[test]
    fn already_snake_case_is_untouched() {
        assert_eq!(camel_to_snake("user_name"), "user_name");
        assert_eq!(camel_to_snake("id"), "id");
    }

    #[test]
    fn digits_and_underscores_pass_through() {
        assert_eq!(camel_to_snake("addressLine2"), "address_line2");
        assert_eq!(camel_to_snake("_privateField"), "_private_field");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(camel_to_snake(""), "");
    }
}
