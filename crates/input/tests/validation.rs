//! Integration tests for diagnostics raised while reading and validating

use mcnpkit_input::{
    parse_input, parse_input_with, read_input, ErrorCode, ErrorCollection, McnpInput, Snapshot,
    Tally, Validator, Vocabulary,
};
use rstest::{fixture, rstest};

#[fixture]
fn broken() -> Snapshot {
    read_input("./data/decks/broken.i").unwrap()
}

#[rstest]
fn every_problem_in_order(broken: Snapshot) {
    let codes = broken
        .errors
        .iter()
        .filter_map(|e| e.code)
        .collect::<Vec<ErrorCode>>();

    assert_eq!(
        codes,
        vec![
            ErrorCode::CellInvalidFormat,
            ErrorCode::MaterialUnevenEntries,
            ErrorCode::TallyUnknownReference,
            ErrorCode::TallyUnknownReference,
            ErrorCode::SurfaceInvalidTransformation,
            ErrorCode::SurfaceInvalidType,
            ErrorCode::CellInvalidMaterial,
            ErrorCode::CellInvalidSurfaces,
            ErrorCode::CellInvalidComplement,
            ErrorCode::CellInvalidLike,
            ErrorCode::CellNoSurfaces,
            ErrorCode::MaterialIsotopeError,
            ErrorCode::TallyCollisionHeatingParticleConflict,
            ErrorCode::TallyInvalidType,
            ErrorCode::TallyMissingParticle,
            ErrorCode::TallyInvalidParticle,
            ErrorCode::TallyMissingEntries,
            ErrorCode::TransformationMissingParameters,
            ErrorCode::PhysicsInvalidModeParticle,
        ]
    );
}

#[rstest]
#[case(ErrorCode::CellInvalidSurfaces, "cell 1 references undefined surfaces: 99")] // case 1
#[case(ErrorCode::CellInvalidMaterial, "cell 1 references undefined material 3")] // case 2
#[case(ErrorCode::CellInvalidComplement, "cell 2 excludes undefined cells: 7")] // case 3
#[case(ErrorCode::CellInvalidLike, "cell 3 is like undefined cell 8")] // case 4
#[case(ErrorCode::SurfaceInvalidType, "surface 3 has unknown type \"zz\"")] // case 5
#[case(ErrorCode::SurfaceInvalidTransformation, "surface 2 references undefined transformation 5")] // case 6
#[case(ErrorCode::MaterialIsotopeError, "material 1 has isotopes with no known element: 200001")] // case 7
#[case(ErrorCode::TallyInvalidParticle, "tally 24 has unknown particles: j")] // case 8
#[case(ErrorCode::TallyUnknownReference, "tally 44 is not defined")] // case 9
#[case(ErrorCode::PhysicsInvalidModeParticle, "mode card has unknown particles: j")] // case 10
fn diagnostic_messages(broken: Snapshot, #[case] code: ErrorCode, #[case] message: &str) {
    let entry = broken.errors.with_code(code).next().unwrap();
    assert_eq!(entry.message, message);
}

#[rstest]
fn diagnostic_sources(broken: Snapshot) {
    let entry = broken.errors.with_code(ErrorCode::CellInvalidFormat).next().unwrap();
    assert_eq!(entry.source_text, "x 0 -1");

    let entry = broken.errors.with_code(ErrorCode::MaterialUnevenEntries).next().unwrap();
    assert_eq!(entry.source_text, "m2 1001 0.5 8016");

    let entry = broken.errors.with_code(ErrorCode::TallyMissingEntries).next().unwrap();
    assert_eq!(entry.source_text, "Tally 34:p none");
}

#[rstest]
fn partial_model_survives(broken: Snapshot) {
    let input = broken.input;

    // the unreadable cell is dropped, everything else is kept
    assert_eq!(input.cells.len(), 4);
    assert_eq!(input.get_surface(1).unwrap().parameters_str(), "6");
    assert_eq!(input.get_material(2).and_then(|m| m.material()).unwrap().isotopes.len(), 1);
    assert_eq!(input.tallies.len(), 6);
    assert_eq!(input.get_tally(44), None);
}

#[test]
fn undefined_surface() {
    let text = "title\n10 0 -1 2 -99\n\n1 px 0\n2 px 1\n3 px 2\n\nf4:n 10\n";
    let snapshot = parse_input(text).unwrap();

    assert_eq!(snapshot.errors.len(), 1);
    let entry = &snapshot.errors.entries()[0];
    assert_eq!(entry.code, Some(ErrorCode::CellInvalidSurfaces));
    assert!(entry.message.contains("10"));
    assert!(entry.message.contains("99"));
}

#[rstest]
#[case("+f4 1 100", 0)] // case 1
#[case("+f4:n 1 100", 1)] // case 2
#[case("+f4:n,p 1 100", 1)] // case 3
fn collision_heating_conflict(#[case] card: &str, #[case] expected: usize) {
    let text = format!("title\n1 0 -1\n100 0 1\n\n1 so 5\n\n{card}\n");
    let snapshot = parse_input(&text).unwrap();

    assert_eq!(
        snapshot
            .errors
            .count(ErrorCode::TallyCollisionHeatingParticleConflict),
        expected
    );
    assert_eq!(snapshot.errors.count(ErrorCode::TallyMissingParticle), 0);
    assert_eq!(snapshot.errors.count(ErrorCode::TallyInvalidParticle), 0);
}

#[test]
fn no_tallies() {
    let snapshot = parse_input("title\n1 0 -1\n\n1 so 5\n\nnps 10\n").unwrap();

    assert_eq!(snapshot.errors.len(), 1);
    let entry = &snapshot.errors.entries()[0];
    assert_eq!(entry.code, Some(ErrorCode::TallyBlockEmpty));
    assert_eq!(entry.source_text, "Tally Block");
    assert_eq!(entry.message, "No tallies present in the file");
}

#[test]
fn invalid_history_count() {
    let snapshot = parse_input("title\n1 0 -1\n\n1 so 5\n\nf4:n 1\nnps 1.5\n").unwrap();
    assert_eq!(snapshot.errors.count(ErrorCode::PhysicsInvalidNps), 1);
    assert_eq!(snapshot.input.physics.nps, None);
}

#[test]
fn rendered_collection() {
    let snapshot = parse_input("title\n1 0 -1\n\n1 so 5\n\nnps 10\n").unwrap();
    assert_eq!(
        snapshot.errors.render(),
        "Error Code: TALLY_BLOCK_EMPTY\nMessage: No tallies present in the file\nCard: Tally Block\n"
    );
    assert_eq!(snapshot.errors.to_string(), snapshot.errors.render());
}

#[test]
fn validator_is_repeatable() {
    let mut input = McnpInput::new();
    input.tallies.insert(
        7,
        Tally {
            id: 7,
            entries: Some(vec!["1".to_string()]),
            ..Default::default()
        },
    );

    let validator = Validator::new(Vocabulary::bundled());
    let mut errors = ErrorCollection::new();
    validator.validate(&input, &mut errors);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.count(ErrorCode::TallyMissingParticle), 1);

    // only ever appends
    validator.validate(&input, &mut errors);
    assert_eq!(errors.len(), 2);
}

#[test]
fn custom_vocabulary() {
    let vocabulary = Vocabulary::from_json(
        r#"{"px": "plane normal to x"}"#,
        "{}",
        r#"{"neutron": {"designator": "N", "mass": 939.56563}}"#,
        "{}",
    )
    .unwrap();

    let text = "title\n1 0 -1\n\n1 so 5\n\nf4:p 1\n";
    let snapshot = parse_input_with(text, &vocabulary).unwrap();

    assert_eq!(snapshot.errors.count(ErrorCode::SurfaceInvalidType), 1);
    assert_eq!(snapshot.errors.count(ErrorCode::TallyInvalidParticle), 1);
}
