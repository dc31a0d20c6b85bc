use cardex::color::Palette;
use cardex::data::source::SourceConfig;
use cardex::data::{CardRecord, SourceType};
use cardex::state::{reduce, Action, AppState, InputEdit, LoadState};
use cardex::store::RecordStore;
use cardex::view::{self, ListView};

use std::io::Write;
use std::path::Path;

const CARDS_JSON: &str = r#"[
  {"identifier": "38010", "name": "Bulbasaur", "attribute": "Grass", "expansion": "Base", "hp": "70",
   "type": "Basic", "skill1Name": "Vine Whip", "skill1Damage": "20", "cardUrl": "https://example.com/38010"},
  {"identifier": "38011", "name": "Charmander", "attribute": "Fire", "expansion": "Base", "hp": 60},
  {"identifier": "38012", "name": "Squirtle", "attribute": "Water", "expansion": "Jungle", "hp": "60"},
  {"identifier": "38013", "name": "Mysterious Fossil", "expansion": "Fossil", "hp": "", "cardUrl": "javascript:alert(1)"}
]"#;

fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path.to_string_lossy().into_owned()
}

fn load(src_type: Option<SourceType>, input: &str) -> AppState {
    let loaded = SourceConfig::default()
        .open::<CardRecord>(src_type, input)
        .and_then(|mut source| RecordStore::load(source.as_mut()));
    reduce(AppState::default(), Action::Loaded(loaded))
}

fn names(state: &AppState) -> Vec<&str> {
    state.result.iter().map(|r| r.name.as_str()).collect()
}

fn edit(state: AppState, edits: Vec<InputEdit>) -> AppState {
    edits
        .into_iter()
        .fold(state, |state, e| reduce(state, Action::Edit(e)))
}

#[test]
fn a_json_catalog_lists_everything_until_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "all_cards.json", CARDS_JSON);
    let state = load(None, &input);

    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(
        names(&state),
        ["Bulbasaur", "Charmander", "Squirtle", "Mysterious Fossil"]
    );

    let state = edit(
        state,
        vec![
            InputEdit::ToggleAttribute("Fire".into()),
            InputEdit::ToggleAttribute("Water".into()),
            InputEdit::SetHpMax("60".into()),
        ],
    );
    assert_eq!(state.result.len(), 4, "edits alone do not filter");

    let state = reduce(state, Action::Apply);
    assert_eq!(names(&state), ["Charmander", "Squirtle"]);

    let state = reduce(state, Action::Reset);
    assert_eq!(state.result.len(), 4);
    assert!(state.inputs.attributes.is_empty());
}

#[test]
fn blank_hp_counts_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "all_cards.json", CARDS_JSON);
    let state = load(None, &input);

    let state = edit(state, vec![InputEdit::SetHpMin("1".into())]);
    let state = reduce(state, Action::Apply);
    assert!(!names(&state).contains(&"Mysterious Fossil"));

    let state = edit(
        state,
        vec![
            InputEdit::SetHpMin("".into()),
            InputEdit::SetHpMax("0".into()),
        ],
    );
    let state = reduce(state, Action::Apply);
    assert_eq!(names(&state), ["Mysterious Fossil"]);
}

#[test]
fn a_selected_card_projects_to_a_detail_view() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "all_cards.json", CARDS_JSON);
    let state = load(None, &input);

    let bulbasaur = state.result[0].clone();
    let state = reduce(state, Action::Select(bulbasaur));
    let detail = view::selection(&state).unwrap();
    assert_eq!(detail.name, "Bulbasaur");
    assert_eq!(detail.attacks.len(), 1);
    assert_eq!(
        detail.link.as_ref().map(|l| l.as_str()),
        Some("https://example.com/38010")
    );

    let fossil = state.result[3].clone();
    let state = reduce(state, Action::Select(fossil));
    let detail = view::selection(&state).unwrap();
    assert!(detail.link.is_none());

    let state = reduce(state, Action::Dismiss);
    assert!(view::selection(&state).is_none());
}

#[test]
fn a_missing_file_leaves_the_app_failed_and_inert() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("all_cards.json");
    let state = load(None, &input.to_string_lossy());

    assert!(matches!(state.load, LoadState::Failed(_)));
    assert!(matches!(
        view::list(&state, &Palette::default()),
        ListView::Failed { .. }
    ));

    let state = reduce(state, Action::Apply);
    assert!(state.result.is_empty());
    assert!(matches!(state.load, LoadState::Failed(_)));
}

#[test]
fn malformed_json_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "all_cards.json", r#"{"cards": []}"#);
    let state = load(None, &input);
    assert!(matches!(state.load, LoadState::Failed(_)));
    assert!(state.store.is_empty());
}

#[test]
fn an_unknown_extension_needs_an_explicit_type() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "cards.dump", CARDS_JSON);

    let state = load(None, &input);
    assert!(matches!(state.load, LoadState::Failed(_)));

    let state = load(Some(SourceType::Json), &input);
    assert_eq!(state.result.len(), 4);
}

#[cfg(feature = "csv")]
#[test]
fn a_csv_export_loads_with_its_own_headers() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "cards.csv",
        "Web Card ID,Name,Attribute,Expansion,HP,Retreat_Cost\n\
         38010,Bulbasaur,Grass,Base,70,1\n\
         38011,Charmander,Fire,Base,60,1\n\
         38013,Mysterious Fossil,,Fossil,,\n",
    );
    let state = load(None, &input);
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(state.store.len(), 3);
    assert_eq!(state.store.records()[0].identifier, "38010");
    assert_eq!(state.store.records()[1].hp(), 60);
    assert_eq!(state.store.records()[2].hp(), 0);
    assert_eq!(state.store.records()[2].attribute, None);

    let state = edit(state, vec![InputEdit::SetName("CHAR".into())]);
    let state = reduce(state, Action::Apply);
    assert_eq!(names(&state), ["Charmander"]);
}

#[cfg(feature = "sqlite")]
#[test]
fn a_sqlite_database_loads_from_the_card_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokemon_cards.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE card_csv (
                id INTEGER PRIMARY KEY,
                web_card_id TEXT,
                name TEXT,
                attribute TEXT,
                expansion TEXT,
                hp INTEGER
            );
            INSERT INTO card_csv VALUES (2, '38011', 'Charmander', 'Fire', 'Base', 60);
            INSERT INTO card_csv VALUES (1, '38010', 'Bulbasaur', 'Grass', 'Base', 70);
            INSERT INTO card_csv VALUES (3, '38013', 'Mysterious Fossil', NULL, 'Fossil', NULL);",
        )
        .unwrap();
    }
    let state = load(None, &path.to_string_lossy());
    assert_eq!(state.load, LoadState::Ready);
    assert_eq!(names(&state), ["Bulbasaur", "Charmander", "Mysterious Fossil"]);
    assert_eq!(state.store.records()[2].hp(), 0);

    let facets = state.store.facets();
    assert_eq!(facets.max_hp, 70);
    assert_eq!(facets.card_count, 3);
    assert!(facets.expansions.contains("Fossil"));
}
