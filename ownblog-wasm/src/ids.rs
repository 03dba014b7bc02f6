/// Проверяет идентификатор backend'а: ровно 24 шестнадцатеричных символа.
///
/// Страницы вызывают это до запроса, чтобы не ходить в сеть с заведомо
/// некорректным id из адресной строки.
pub(crate) fn parse_object_id(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Some(raw.to_string());
    }
    None
}
