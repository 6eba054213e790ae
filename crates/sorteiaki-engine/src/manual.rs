use sorteiaki_model::{Participant, ParticipantId};

pub const MANUAL_ID_PREFIX: &str = "man-";

/// Turns a pasted name list into participants, one per non-blank line.
///
/// Ids are `man-{i}` where `i` counts kept lines only.
#[must_use]
pub fn parse_manual_list(text: &str) -> Vec<Participant> {
    text.lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .enumerate()
        .filter_map(|(i, name)| {
            ParticipantId::parse(&format!("{MANUAL_ID_PREFIX}{i}"))
                .ok()
                .map(|id| Participant::new(id, name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_manual_list;

    #[test]
    fn blank_lines_do_not_consume_indices() {
        let parsed = parse_manual_list("  João Silva \n\n\t\nMaria Oliveira\r\nPedro Santos");
        let view: Vec<(&str, &str)> = parsed
            .iter()
            .map(|p| (p.id.as_str(), p.username.as_str()))
            .collect();
        assert_eq!(
            view,
            [
                ("man-0", "João Silva"),
                ("man-1", "Maria Oliveira"),
                ("man-2", "Pedro Santos")
            ]
        );
        assert!(parsed.iter().all(|p| p.content.is_none()));
    }

    #[test]
    fn empty_text_yields_empty_pool() {
        assert!(parse_manual_list("\n \n").is_empty());
    }
}
