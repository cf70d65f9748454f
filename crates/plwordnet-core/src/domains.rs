//! Domain codes used by plWordNet lexical units
//!
//! Static configuration data; the query engine never consults it.

use serde::Serialize;

/// A semantic domain label attached to lexical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub code: &'static str,
    pub name: &'static str,
    pub pos: &'static str,
}

const fn domain(code: &'static str, name: &'static str, pos: &'static str) -> Domain {
    Domain { code, name, pos }
}

static DOMAINS: [Domain; 45] = [
    domain("bhp", "the highest in the hierarchy", "noun"),
    domain("cech", "attribute", "noun"),
    domain("cel", "motive", "noun"),
    domain("czas", "time", "noun"),
    domain("czc", "body", "noun"),
    domain("czuj", "emotion", "noun"),
    domain("czy", "act", "noun"),
    domain("grp", "group", "noun"),
    domain("il", "quantity", "noun"),
    domain("jedz", "food", "noun"),
    domain("ksz", "shape", "noun"),
    domain("msc", "location", "noun"),
    domain("os", "person", "noun"),
    domain("por", "communication", "noun"),
    domain("pos", "possession", "noun"),
    domain("prc", "process", "noun"),
    domain("rsl", "plant", "noun"),
    domain("rz", "natural object", "noun"),
    domain("sbst", "substance", "noun"),
    domain("st", "state", "noun"),
    domain("sys", "classification", "noun"),
    domain("umy", "cognition", "noun"),
    domain("wytw", "artefact", "noun"),
    domain("zdarz", "event", "noun"),
    domain("zj", "natural phenomenon", "noun"),
    domain("zw", "animal", "noun"),
    domain("cczuj", "emotion", "verb"),
    domain("cjedz", "consumption", "verb"),
    domain("cpor", "communication", "verb"),
    domain("cpos", "possession", "verb"),
    domain("cst", "state", "verb"),
    domain("cumy", "cognition", "verb"),
    domain("cwytw", "creation", "verb"),
    domain("dtk", "contact", "verb"),
    domain("hig", "body", "verb"),
    domain("pog", "weather", "verb"),
    domain("pst", "perception", "verb"),
    domain("ruch", "motion", "verb"),
    domain("sp", "social", "verb"),
    domain("wal", "competition", "verb"),
    domain("zmn", "change", "verb"),
    domain("grad", "deadjectival", "adj"),
    domain("jak", "quality", "adj"),
    domain("odcz", "deverbal", "adj"),
    domain("rel", "relation", "adj"),
];

/// Look up a domain by its code.
pub fn lookup(code: &str) -> Option<&'static Domain> {
    DOMAINS.iter().find(|d| d.code == code)
}

/// Every known domain, in table order.
pub fn all() -> impl Iterator<Item = &'static Domain> {
    DOMAINS.iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup() {
        let zw = lookup("zw").unwrap();
        assert_eq!(zw.name, "animal");
        assert_eq!(zw.pos, "noun");

        assert_eq!(lookup("ruch").unwrap().pos, "verb");
        assert_eq!(lookup("jak").unwrap().pos, "adj");
        assert!(lookup("xyz").is_none());
    }

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<_> = all().map(|d| d.code).collect();
        assert_eq!(codes.len(), DOMAINS.len());
    }

    #[test]
    fn test_shared_names_across_pos() {
        let emotions: Vec<_> = all().filter(|d| d.name == "emotion").map(|d| d.pos).collect();
        assert_eq!(emotions, vec!["noun", "verb"]);
    }
}
