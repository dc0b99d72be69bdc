use super::helpers::record_by_input;
use super::CmdResult;
use crate::error::Result;
use crate::store::{KvBackend, RecordStore};

pub fn run<B: KvBackend>(store: &RecordStore<B>, id_input: &str) -> Result<CmdResult> {
    let record = record_by_input(store, id_input)?.clone();
    Ok(CmdResult::default().with_listed_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApplicationDraft;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_view_by_prefix() {
        let mut store = RecordStore::open(MemBackend::new());
        let record = store
            .add(ApplicationDraft::new("Acme", "Dev").with_notes("call back"))
            .unwrap();

        let result = run(&store, &record.id.to_string()[..6]).unwrap();
        assert_eq!(result.listed_records.len(), 1);
        assert_eq!(result.listed_records[0].notes.as_deref(), Some("call back"));
    }

    #[test]
    fn test_view_unknown_is_error() {
        let store = RecordStore::open(MemBackend::new());
        assert!(run(&store, "abcdef").is_err());
    }
}
