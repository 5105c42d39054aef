use std::collections::HashMap;

/// Ordered key-value store for the view parameters carried in the URL.
///
/// The first `set` of a key fixes its position in iteration order; later sets
/// replace the value in place. Serialization walks insertion order, so the
/// same state always produces the same query string.
#[derive(Debug, Clone, Default)]
pub struct Query {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert. Position is fixed by the first insertion of the key.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 = value.to_string(),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value.to_string()));
            }
        }
    }

    /// Stored value, or the empty string when the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.index.get(key).map(|&i| self.entries[i].1.as_str()).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a URL search string (`?a=b&c=d`, leading `?` optional) into this
    /// query, upserting pair by pair in string order. Keys already present
    /// keep their position; keys absent from the string keep their value.
    pub fn load_search_params(&mut self, search: &str) {
        let search = search.strip_prefix('?').unwrap_or(search);
        if search.is_empty() {
            return;
        }
        for pair in search.split('&') {
            let mut kv = pair.splitn(2, '=');
            let (Some(key), Some(value)) = (kv.next(), kv.next()) else {
                continue;
            };
            let key = decode_component(key);
            let value = decode_component(value);
            if !key.is_empty() {
                self.set(&key, &value);
            }
        }
    }

    /// New query containing only the entries whose value differs from the
    /// same key in `defaults`. This is what keeps URLs minimal.
    pub fn filter(&self, defaults: &Query) -> Query {
        let mut out = Query::new();
        for (key, value) in self.iter() {
            if value != defaults.get(key) {
                out.set(key, value);
            }
        }
        out
    }

    /// URL-encoded search string (`?k=v&…`) in insertion order, or the empty
    /// string when there is nothing to serialize.
    pub fn to_search(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let body = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", body)
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Query {}

/// Percent-decode one query component. `+` also decodes to a space because
/// `URLSearchParams` output may reach us through pasted URLs.
fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s).map(|c| c.into_owned()).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_on_absent_key_is_empty() {
        let q = Query::new();
        assert_eq!(q.get("country"), "");
    }

    #[test]
    fn set_keeps_first_insertion_order() {
        let mut q = Query::new();
        q.set("country", "Japan");
        q.set("category", "deaths");
        q.set("country", "Italy");
        let order: Vec<&str> = q.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["country", "category"]);
        assert_eq!(q.get("country"), "Italy");
    }

    #[test]
    fn load_preserves_defaults_for_absent_keys() {
        let mut q = Query::new();
        q.set("category", "confirmed");
        q.set("yscale", "liner");
        q.load_search_params("?yscale=log");
        assert_eq!(q.get("category"), "confirmed");
        assert_eq!(q.get("yscale"), "log");
    }

    #[test]
    fn encoded_values_survive_the_trip() {
        let mut q = Query::new();
        q.set("country", "Korea, South");
        q.set("startdate", "2020/04/01");
        let mut parsed = Query::new();
        parsed.load_search_params(&q.to_search());
        assert_eq!(parsed, q);
    }
}
