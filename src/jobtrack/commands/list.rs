use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::{derive_view, ViewCriteria};
use crate::store::{KvBackend, RecordStore};

pub fn run<B: KvBackend>(store: &RecordStore<B>, criteria: &ViewCriteria) -> Result<CmdResult> {
    let view = derive_view(store.all(), criteria);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(showing_message(view.len())));
    Ok(result.with_listed_records(view))
}

fn showing_message(count: usize) -> String {
    format!("Showing {} applications.", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplicationDraft, Status};
    use crate::query::{SortConfig, SortDirection, SortKey, StatusFilter};
    use crate::store::mem_backend::MemBackend;

    fn seeded() -> RecordStore<MemBackend> {
        let mut store = RecordStore::open(MemBackend::new());
        store
            .add(ApplicationDraft::new("Globex", "Designer").with_status(Status::Rejected))
            .unwrap();
        store
            .add(ApplicationDraft::new("Acme", "Engineer").with_status(Status::Offer))
            .unwrap();
        store
            .add(ApplicationDraft::new("Initech", "Engineer"))
            .unwrap();
        store
    }

    #[test]
    fn test_default_view_lists_everything() {
        let store = seeded();
        let result = run(&store, &ViewCriteria::default()).unwrap();
        assert_eq!(result.listed_records.len(), 3);
        assert_eq!(result.messages[0].content, "Showing 3 applications.");
    }

    #[test]
    fn test_filter_search_and_sort_compose() {
        let store = seeded();
        let criteria = ViewCriteria::default()
            .with_search("engineer")
            .with_sort(SortConfig::new(SortKey::Company, SortDirection::Ascending));
        let result = run(&store, &criteria).unwrap();

        let companies: Vec<_> = result
            .listed_records
            .iter()
            .map(|r| r.company.as_str())
            .collect();
        assert_eq!(companies, ["Acme", "Initech"]);

        let offers = run(
            &store,
            &ViewCriteria::default().with_status(StatusFilter::Only(Status::Offer)),
        )
        .unwrap();
        assert_eq!(offers.listed_records.len(), 1);
        assert_eq!(offers.messages[0].content, "Showing 1 applications.");
    }

    #[test]
    fn test_list_does_not_touch_backend() {
        let store = seeded();
        let writes = store.backend().write_count();
        run(&store, &ViewCriteria::default()).unwrap();
        assert_eq!(store.backend().write_count(), writes);
    }
}
