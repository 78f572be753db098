//! Path parameter extraction from endpoint path templates.
//!
//! Templates use `{param}` syntax, e.g. `/{db}/_design/{ddoc}`.

/// Extracts parameter names from a path template, in order of appearance.
///
/// Repeated placeholders are returned once per occurrence so callers can
/// detect duplicates.
///
/// ## Examples
///
/// ```
/// use couchspec::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/_all_dbs"), Vec::<&str>::new());
/// assert_eq!(extract_path_params("/{db}"), vec!["db"]);
/// assert_eq!(
///     extract_path_params("/{db}/{docid}/{attachment}"),
///     vec!["db", "docid", "attachment"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(pos) = start.take() {
                    let param = &path[pos..idx];
                    if !param.is_empty() {
                        params.push(param);
                    }
                }
            }
            _ => {}
        }
    }

    params
}
