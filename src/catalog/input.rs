//! Parsing of user-entered name lists.

/// Split a comma-separated list, trimming each item and dropping empty ones.
///
/// `"carrot, , Onion ,"` becomes `["carrot", "Onion"]`.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_trim() {
        assert_eq!(split_list("carrot, , Onion ,"), ["carrot", "Onion"]);
        assert_eq!(split_list(" olive oil "), ["olive oil"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_list("").is_empty());
        assert!(split_list(" ,  ,").is_empty());
    }
}
