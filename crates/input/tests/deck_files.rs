//! Integration tests for reading complete input decks

use mcnpkit_input::{
    parse_input, preprocess, read_input, BlockKind, Boundary, Density, Error, Item, ItemKind, Line,
    MaterialEntry, Snapshot,
};
use rstest::{fixture, rstest};

#[fixture]
fn simple() -> Snapshot {
    read_input("./data/decks/simple.i").unwrap()
}

#[fixture]
fn continuation() -> Snapshot {
    read_input("./data/decks/continuation.i").unwrap()
}

#[rstest]
fn simple_deck_is_clean(simple: Snapshot) {
    assert!(simple.errors.is_empty(), "{}", simple.errors);
    assert_eq!(simple.input.title, "Simple test deck");
    assert_eq!(simple.input.message, None);
}

#[rstest]
fn simple_deck_entities(simple: Snapshot) {
    let input = simple.input;
    assert_eq!(input.cells.len(), 4);
    assert_eq!(input.surfaces.len(), 3);
    assert_eq!(input.materials.len(), 3);
    assert_eq!(input.tallies.len(), 3);
    assert_eq!(input.transformations.len(), 1);

    let cell = input.get_cell(1).unwrap();
    assert_eq!(cell.material, 1);
    assert_eq!(cell.density_kind(), Density::Mass(7.8));
    assert_eq!(cell.region.surfaces(), &[1]);
    assert_eq!(cell.importance.get("n"), Some(&1.0));
    assert_eq!(cell.importance.get("p"), Some(&1.0));
    assert_eq!(cell.comment.as_deref(), Some("cells"));

    let cell = input.get_cell(2).unwrap();
    assert_eq!(cell.density_kind(), Density::Atomic(0.0708));
    assert_eq!(cell.importance.len(), 2);

    let cell = input.get_cell(4).unwrap();
    assert_eq!(cell.like, Some(2));

    let surface = input.get_surface(2).unwrap();
    assert_eq!(surface.transform, Some(1));
    assert_eq!(surface.parameters_str(), "50.0");
    assert_eq!(surface.comment, None);

    let surface = input.get_surface(3).unwrap();
    assert_eq!(surface.boundary, Boundary::Reflecting);
    assert_eq!(surface.kind, "px");

    assert_eq!(input.get_material(0), Some(&MaterialEntry::Void));
    let material = input.get_material(1).and_then(|m| m.material()).unwrap();
    assert_eq!(material.isotopes.len(), 2);
    assert_eq!(material.isotopes[1].name(), "C-12");
    assert_eq!(material.isotopes[1].library.as_deref(), Some("00c"));

    assert_eq!(input.get_transformation(1).unwrap().parameters, "0 0 10");
}

#[rstest]
fn simple_deck_tallies(simple: Snapshot) {
    let input = simple.input;

    let tally = input.get_tally(4).unwrap();
    assert_eq!(tally.particle_list(), &["n"]);
    assert_eq!(tally.entry_list(), &["1", "2"]);
    assert_eq!(tally.comment.as_deref(), Some("flux in the sphere"));
    assert_eq!(
        tally.energies,
        Some(vec!["1e-3".to_string(), "1".to_string(), "20".to_string()])
    );

    // own bins win over the e0 defaults
    let tally = input.get_tally(14).unwrap();
    assert_eq!(
        tally.energies,
        Some(vec!["0.1".to_string(), "1".to_string(), "10".to_string()])
    );

    let tally = input.get_tally(6).unwrap();
    assert!(tally.collision_heating);
    assert_eq!(tally.particles, None);
    assert_eq!(tally.energies.as_ref().map(Vec::len), Some(3));
}

#[rstest]
fn simple_deck_physics(simple: Snapshot) {
    let physics = simple.input.physics;
    assert_eq!(physics.mode, vec!["n", "p"]);
    assert_eq!(physics.nps, Some(1_000_000));
    assert_eq!(physics.kcode, None);
}

#[rstest]
fn message_block() {
    let snapshot = read_input("./data/decks/message.i").unwrap();
    assert!(snapshot.errors.is_empty(), "{}", snapshot.errors);

    let input = snapshot.input;
    assert_eq!(input.message.as_deref(), Some("outp=run.o runtpe=run.r"));
    assert_eq!(input.title, "Deck with a message block");
    assert_eq!(input.cells.len(), 2);
    assert_eq!(input.physics.nps, Some(1000));

    assert_eq!(input.block_locations.message, Some(0..2));
    assert_eq!(input.classify_block(0), None);
    assert_eq!(input.classify_block(2), Some(BlockKind::Cells));
}

#[rstest]
fn continued_cards(continuation: Snapshot) {
    assert!(continuation.errors.is_empty(), "{}", continuation.errors);
    let input = continuation.input;

    let cell = input.get_cell(10).unwrap();
    assert_eq!(cell.region.surfaces(), &[1, 2, 3, 4]);
    assert_eq!(cell.importance.get("n"), Some(&1.0));
    assert_eq!(cell.comment.as_deref(), Some("geometry with a long region"));

    let cell = input.get_cell(20).unwrap();
    assert_eq!(cell.region.surfaces(), &[5]);
    assert_eq!(cell.region.excluded(), &[10]);
    assert_eq!(cell.importance.get("n"), Some(&1.0));
    assert_eq!(cell.comment.as_deref(), Some("concrete"));

    let material = input.get_material(3).and_then(|m| m.material()).unwrap();
    assert_eq!(material.isotopes.len(), 4);
    assert_eq!(material.isotopes[3].name(), "Ca-40");
    assert_eq!(material.isotopes[3].abundance, -0.12);

    assert_eq!(input.physics.nps, Some(1500));
}

#[test]
fn repeat_shorthand() {
    let text = std::fs::read_to_string("./data/decks/continuation.i").unwrap();
    let deck = preprocess(&text).unwrap();

    assert!(deck.physics.contains(&Line::Card("sd4 1 1 1".to_string())));
    assert!(deck.physics.contains(&Line::Card("e4 1 3i 5".to_string())));
}

#[test]
fn oversized_repeat_is_kept() {
    let text = "title\n1 0 -1\n\n1 so 5\n\nf4:n 1\ne4 1 4294967295r\n";
    let snapshot = parse_input(text).unwrap();

    let tally = snapshot.input.get_tally(4).unwrap();
    assert_eq!(
        tally.energies,
        Some(vec!["1".to_string(), "4294967295r".to_string()])
    );
}

#[rstest]
#[case("./data/decks/simple.i", 25)] // case 1
#[case("./data/decks/message.i", 10)] // case 2
#[case("./data/decks/continuation.i", 20)] // case 3
#[case("./data/decks/broken.i", 24)] // case 4
fn blocks_partition_the_file(#[case] path: &str, #[case] lines: usize) {
    let snapshot = read_input(path).unwrap();
    let locations = &snapshot.input.block_locations;

    let start = locations.message.as_ref().map_or(0, |m| m.end);
    assert_eq!(locations.cells.start, start);
    assert_eq!(locations.cells.end, locations.surfaces.start);
    assert_eq!(locations.surfaces.end, locations.physics.start);
    assert_eq!(locations.physics.end, lines);

    for n in start..lines {
        assert!(snapshot.input.classify_block(n).is_some());
    }
    assert_eq!(snapshot.input.classify_block(lines), None);
}

#[rstest]
#[case(0, Some(BlockKind::Cells))] // case 1
#[case(5, Some(BlockKind::Cells))] // case 2
#[case(6, Some(BlockKind::Cells))] // case 3
#[case(7, Some(BlockKind::Surfaces))] // case 4
#[case(11, Some(BlockKind::Surfaces))] // case 5
#[case(12, Some(BlockKind::Physics))] // case 6
#[case(24, Some(BlockKind::Physics))] // case 7
#[case(25, None)] // case 8
fn classify_lines(simple: Snapshot, #[case] line: usize, #[case] expected: Option<BlockKind>) {
    assert_eq!(simple.input.classify_block(line), expected);
}

#[rstest]
#[case(ItemKind::Surface, 3, "Surface 3: px 100")] // case 1
#[case(ItemKind::Surface, 2, "Surface 2: so 50.0  tr: 1")] // case 2
#[case(ItemKind::Tally, 14, "Tally 14:p 1")] // case 3
#[case(ItemKind::Cell, 9, "Cell 9: not recognised in this input")] // case 4
#[case(ItemKind::Material, 7, "Material 7: not recognised in this input")] // case 5
#[case(ItemKind::Tally, 5, "Tally 5: not recognised in this input")] // case 6
#[case(ItemKind::Transformation, 2, "Transformation 2: not recognised in this input")] // case 7
fn items_by_kind(
    simple: Snapshot,
    #[case] kind: ItemKind,
    #[case] id: u32,
    #[case] expected: &str,
) {
    assert_eq!(simple.input.get_item_by_kind(kind, id).to_string(), expected);
}

#[rstest]
fn items_found(simple: Snapshot) {
    let input = &simple.input;
    assert!(matches!(input.get_item_by_kind(ItemKind::Cell, 1), Item::Cell(c) if c.id == 1));
    assert!(matches!(
        input.get_item_by_kind(ItemKind::Material, 0),
        Item::Material(MaterialEntry::Void)
    ));
    assert!(input.get_item_by_kind(ItemKind::Cell, 99).is_not_found());
}

#[rstest]
fn reverse_lookups(simple: Snapshot) {
    let input = &simple.input;

    let cells = input.cells_using_surface(2).map(|c| c.id).collect::<Vec<u32>>();
    assert_eq!(cells, vec![2, 3]);

    let cells = input.cells_using_material(0).map(|c| c.id).collect::<Vec<u32>>();
    assert_eq!(cells, vec![3]);
}

#[rstest]
#[case("./data/decks/simple.i")] // case 1
#[case("./data/decks/continuation.i")] // case 2
#[case("./data/decks/broken.i")] // case 3
fn parsing_is_idempotent(#[case] path: &str) {
    let first = read_input(path).unwrap();
    let second = read_input(path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_separators() {
    let result = read_input("./data/decks/separators.i");
    assert!(matches!(
        result,
        Err(Error::MissingBlockSeparators { found: 1 })
    ));
}

#[test]
fn missing_file() {
    let result = read_input("./data/decks/not_a_deck.i");
    assert!(matches!(result, Err(Error::IOError(_))));
}
