use arcos_core::model::note::{seed_notes, UNTITLED_NOTE_TITLE};
use arcos_core::{keys, MemorySlotRepository, Note, NotePatch, NoteStore, SlotRepository};
use chrono::DateTime;

fn persisted_notes(repo: &MemorySlotRepository) -> Vec<Note> {
    let raw = repo.get_slot(keys::NOTES).unwrap().expect("note slot should exist");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn first_load_seeds_demo_notes() {
    let repo = MemorySlotRepository::new();
    let store = NoteStore::load(&repo).unwrap();

    assert_eq!(store.notes(), seed_notes().as_slice());
    assert_eq!(persisted_notes(&repo), seed_notes());
}

#[test]
fn malformed_slot_falls_back_to_seed() {
    let repo = MemorySlotRepository::with_slots([(keys::NOTES, "{not json")]);
    let store = NoteStore::load(&repo).unwrap();
    assert_eq!(store.notes(), seed_notes().as_slice());
    assert_eq!(
        repo.get_slot(keys::NOTES).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn note_with_null_tags_is_kept() {
    let raw = r#"[{"id":"a","title":"mine","content":"body","tags":null,"createdAt":"2025-01-01","updatedAt":"2025-01-01","encrypted":false,"onChain":false}]"#;
    let repo = MemorySlotRepository::with_slots([(keys::NOTES, raw)]);

    let store = NoteStore::load(&repo).unwrap();

    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].title, "mine");
    assert!(store.notes()[0].tags.is_empty());
    assert_eq!(persisted_notes(&repo)[0].title, "mine");
}

#[test]
fn deleting_every_note_leaves_slot_untouched() {
    let repo = MemorySlotRepository::new();
    let mut store = NoteStore::load(&repo).unwrap();
    let before = repo.get_slot(keys::NOTES).unwrap();
    assert!(before.is_some());

    assert!(store.delete("1").unwrap());
    let after_first = repo.get_slot(keys::NOTES).unwrap();
    assert!(store.delete("2").unwrap());

    assert!(store.notes().is_empty());
    assert_eq!(repo.get_slot(keys::NOTES).unwrap(), after_first);
    assert_eq!(persisted_notes(&repo).len(), 1);
}

#[test]
fn note_collection_round_trips_through_json() {
    let mut notes = seed_notes();
    notes.push(Note::blank(chrono::Utc::now()));
    let encoded = serde_json::to_string(&notes).unwrap();
    let decoded: Vec<Note> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, notes);
}

#[test]
fn create_inserts_blank_note_at_front_and_selects_it() {
    let repo = MemorySlotRepository::new();
    let mut store = NoteStore::load(&repo).unwrap();

    let id = store.create().unwrap();

    let first = &store.notes()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.title, UNTITLED_NOTE_TITLE);
    assert!(first.content.is_empty());
    assert!(first.tags.is_empty());
    assert!(first.encrypted);
    assert!(!first.on_chain);
    assert!(DateTime::parse_from_rfc3339(&first.created_at).is_ok());
    assert_eq!(store.selected().map(|note| note.id.as_str()), Some(id.as_str()));
    assert_eq!(persisted_notes(&repo).len(), 3);
}

#[test]
fn update_merges_fields_and_leaves_others_untouched() {
    let repo = MemorySlotRepository::new();
    let mut store = NoteStore::load(&repo).unwrap();

    assert!(store
        .update("2", &NotePatch::default().title("Audit v2").on_chain(true))
        .unwrap());

    let mut expected = seed_notes();
    expected[1].title = "Audit v2".to_string();
    expected[1].on_chain = true;
    assert_eq!(store.notes(), expected.as_slice());
    assert_eq!(persisted_notes(&repo), expected);

    assert!(!store
        .update("missing", &NotePatch::default().content("x"))
        .unwrap());
}

#[test]
fn deleting_selected_note_clears_selection() {
    let repo = MemorySlotRepository::new();
    let mut store = NoteStore::load(&repo).unwrap();
    assert!(store.select("1"));

    assert!(store.delete("2").unwrap());
    assert_eq!(store.selected().map(|note| note.id.as_str()), Some("1"));

    assert!(store.delete("1").unwrap());
    assert!(store.selected().is_none());
    assert!(!store.delete("1").unwrap());
}

#[test]
fn search_matches_title_or_tag_ignoring_case() {
    let repo = MemorySlotRepository::new();
    let store = NoteStore::load(&repo).unwrap();

    let by_title: Vec<_> = store.search("treasury").into_iter().map(|n| n.id.as_str()).collect();
    assert_eq!(by_title, ["1"]);

    let by_tag: Vec<_> = store.search("CRIT").into_iter().map(|n| n.id.as_str()).collect();
    assert_eq!(by_tag, ["2"]);

    assert_eq!(store.search("").len(), 2);
    assert!(store.search("confidential").is_empty());
    assert_eq!(store.notes().len(), 2);
}

#[test]
fn tag_editor_appends_and_removes_by_position() {
    let repo = MemorySlotRepository::new();
    let mut store = NoteStore::load(&repo).unwrap();

    assert!(store.add_tag("1", "DAO").unwrap());
    assert_eq!(
        store.get("1").unwrap().tags,
        vec!["Strategy".to_string(), "Finance".to_string(), "DAO".to_string()]
    );

    assert!(store.remove_tag_at("1", 1).unwrap());
    assert_eq!(
        persisted_notes(&repo)[0].tags,
        vec!["Strategy".to_string(), "DAO".to_string()]
    );
}
