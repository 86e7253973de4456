/// Splits a blob path into its category (the directory portion) and file
/// name, the way the record store files it.
///
/// A trailing `/` is ignored. Objects at the bucket root have no category.
pub fn split_object_path(path: &str) -> (Option<&str>, &str) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(pos) => {
            let dir = &trimmed[..pos];
            let category = (!dir.is_empty()).then_some(dir);
            (category, &trimmed[pos + 1..])
        }
        None => (None, trimmed),
    }
}
