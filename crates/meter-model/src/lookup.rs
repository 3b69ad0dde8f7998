use std::collections::HashMap;

/// Column-name lookup that ignores case and repeated whitespace.
///
/// Keeps the first original spelling for each normalized key.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveLookup {
    map: HashMap<String, String>,
}

impl CaseInsensitiveLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(normalize_key(name))
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&normalize_key(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&normalize_key(name))
    }
}

fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_and_spacing() {
        let lookup = CaseInsensitiveLookup::new(["Numéro de compteur", "Diametre"]);
        assert_eq!(lookup.get("NUMÉRO DE COMPTEUR"), Some("Numéro de compteur"));
        assert_eq!(lookup.get("numéro  de compteur "), Some("Numéro de compteur"));
        assert!(lookup.contains("diametre"));
        assert!(!lookup.contains("Diamètre"));
    }
}
