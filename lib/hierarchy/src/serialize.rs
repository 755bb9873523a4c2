use crate::collect::ClassMap;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// An error raised while persisting or loading a collected map.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file is not the expected JSON object of arrays.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Orders a map for deterministic output: keys and per-key values sorted.
fn ordered(map: &ClassMap) -> BTreeMap<&str, Vec<&str>> {
    map.iter()
        .map(|(key, values)| {
            let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
            values.sort_unstable();
            (key.as_str(), values)
        })
        .collect()
}

/// Writes a class map as a JSON object of string arrays.
pub fn write_class_map<W: Write>(writer: W, map: &ClassMap) -> Result<(), PersistError> {
    serde_json::to_writer(writer, &ordered(map))?;
    Ok(())
}

/// Reads a class map written by [`write_class_map`].
pub fn read_class_map<R: Read>(reader: R) -> Result<ClassMap, PersistError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Writes domain and range maps as a two-element JSON array.
pub fn write_domain_range<W: Write>(
    writer: W,
    domains: &ClassMap,
    ranges: &ClassMap,
) -> Result<(), PersistError> {
    serde_json::to_writer(writer, &(ordered(domains), ordered(ranges)))?;
    Ok(())
}

/// Reads the maps written by [`write_domain_range`].
pub fn read_domain_range<R: Read>(reader: R) -> Result<(ClassMap, ClassMap), PersistError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn example_map() -> ClassMap {
        let mut map = ClassMap::default();
        map.insert(
            "http://example.org/class/11".to_owned(),
            ["http://example.org/class/1".to_owned()].into_iter().collect(),
        );
        map.insert("http://example.org/class/1".to_owned(), FxHashSet::default());
        map
    }

    #[test]
    fn test_class_map_round_trip() {
        let map = example_map();
        let mut buffer = Vec::new();
        write_class_map(&mut buffer, &map).unwrap();
        assert_eq!(read_class_map(buffer.as_slice()).unwrap(), map);
    }

    #[test]
    fn test_output_is_deterministic() {
        let map = example_map();
        let mut buffer = Vec::new();
        write_class_map(&mut buffer, &map).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"http://example.org/class/1\":[],\
             \"http://example.org/class/11\":[\"http://example.org/class/1\"]}"
        );
    }

    #[test]
    fn test_domain_range_round_trip() {
        let domains = example_map();
        let ranges = ClassMap::default();
        let mut buffer = Vec::new();
        write_domain_range(&mut buffer, &domains, &ranges).unwrap();
        let (read_domains, read_ranges) = read_domain_range(buffer.as_slice()).unwrap();
        assert_eq!(read_domains, domains);
        assert_eq!(read_ranges, ranges);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(read_class_map("not json".as_bytes()).is_err());
    }
}
