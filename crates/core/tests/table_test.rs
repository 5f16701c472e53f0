//! End-to-end tests for table detection and cell field mapping.

use cellmap_core::api::{ExtractOptions, extract_table_fields, extract_table_fields_from_json};
use cellmap_core::fields::{FieldSettings, FieldType};
use cellmap_core::geometry::BBox;
use cellmap_core::table::{GroupingStrategy, ProximityMeasure, TableSettings, detect_tables};
use cellmap_core::{CellMapError, FieldCandidate};

/// Row-major grid of candidates; `labels[r][c]` is the label of each slot.
fn grid(xs: &[f64], ys: &[f64], width: f64, labels: &[&[Option<&str>]]) -> Vec<FieldCandidate> {
    let mut out = Vec::new();
    for (r, &y) in ys.iter().enumerate() {
        for (c, &x) in xs.iter().enumerate() {
            let label = labels.get(r).and_then(|row| row.get(c)).copied().flatten();
            out.push(FieldCandidate::new(
                format!("r{r}c{c}"),
                label,
                BBox::new(x, y, width, 30.0),
            ));
        }
    }
    out
}

fn employee_grid() -> Vec<FieldCandidate> {
    grid(
        &[50.0, 220.0, 340.0],
        &[100.0, 140.0, 180.0, 220.0],
        100.0,
        &[&[Some("Nome"), Some("Idade"), Some("Salário")]],
    )
}

#[test]
fn test_header_grid_four_by_three() {
    let cands = employee_grid();
    let out = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();

    assert_eq!(out.tables.len(), 1);
    let table = &out.tables[0];
    assert_eq!((table.row_count, table.col_count), (4, 3));
    assert!(table.has_header_row);
    assert_eq!(table.cells.len(), 12);
    assert_eq!(table.origin, (50.0, 100.0));
    assert_eq!(table.extent, (390.0, 150.0));
    assert!(out.standalone.is_empty());

    let fields = &out.mappings[0].fields;
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    insta::assert_snapshot!(names.join("\n"), @r"
    tabela_1_header_col1
    tabela_1_header_col2
    tabela_1_header_col3
    tabela_1_linha1_col1
    tabela_1_linha1_col2
    tabela_1_linha1_col3
    tabela_1_linha2_col1
    tabela_1_linha2_col2
    tabela_1_linha2_col3
    tabela_1_linha3_col1
    tabela_1_linha3_col2
    tabela_1_linha3_col3
    ");

    assert_eq!(fields[0].label, "Nome");
    assert_eq!(fields[0].field_type, FieldType::Text);
    assert_eq!(fields[1].field_type, FieldType::Number);
    assert_eq!(fields[2].field_type, FieldType::Number);
    assert_eq!(fields[4].label, "Tabela 1 - Linha 1, Col 2");
    assert_eq!(fields[4].id, "r1c1");
}

#[test]
fn test_isolated_candidates_stay_standalone() {
    let cands = vec![
        FieldCandidate::new("a", Some("Assinatura"), BBox::new(10.0, 10.0, 120.0, 30.0)),
        FieldCandidate::new("b", Some("Local"), BBox::new(400.0, 600.0, 120.0, 30.0)),
    ];
    let out = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    assert!(out.tables.is_empty());
    assert!(out.mappings.is_empty());
    assert_eq!(out.standalone, cands);
}

#[test]
fn test_plain_two_by_two_has_no_header() {
    let cands = grid(
        &[0.0, 60.0],
        &[0.0, 40.0],
        50.0,
        &[&[Some("A"), Some("B")], &[Some("1"), Some("2")]],
    );
    let out = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    assert_eq!(out.tables.len(), 1);
    assert!(!out.tables[0].has_header_row);

    let names: Vec<&str> = out.mappings[0]
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "tabela_1_linha1_col1",
            "tabela_1_linha1_col2",
            "tabela_1_linha2_col1",
            "tabela_1_linha2_col2",
        ]
    );
}

#[test]
fn test_single_expansion_with_origin_distance_splits_wide_grid() {
    // Column origins are 120-170 apart, beyond the 100-unit threshold, so the
    // origin/single-expansion combination cannot see the table.
    let settings = ExtractOptions {
        table: TableSettings {
            grouping: GroupingStrategy::SingleExpansion,
            proximity: ProximityMeasure::Origin,
            ..Default::default()
        },
        ..Default::default()
    };
    let out = extract_table_fields(&employee_grid(), &settings).unwrap();
    assert!(out.tables.is_empty());
    assert_eq!(out.standalone.len(), 12);
}

#[test]
fn test_two_tables_on_one_page() {
    let mut cands = grid(&[0.0, 60.0], &[0.0, 40.0], 50.0, &[]);
    let mut right = grid(&[600.0, 660.0, 720.0], &[500.0, 540.0], 50.0, &[]);
    for c in &mut right {
        c.id = format!("right_{}", c.id);
    }
    cands.extend(right);

    let tables = detect_tables(&cands, &TableSettings::default());
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].name, "Tabela 1");
    assert_eq!((tables[1].row_count, tables[1].col_count), (2, 3));

    let out = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    let mut names: Vec<&str> = out
        .mappings
        .iter()
        .flat_map(|m| m.fields.iter().map(|f| f.name.as_str()))
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
    assert_eq!(total, 10);
}

#[test]
fn test_scattered_group_is_not_a_table() {
    // Close enough to group but laid out on a staircase.
    let cands: Vec<FieldCandidate> = (0..5)
        .map(|i| {
            let v = f64::from(i) * 35.0;
            FieldCandidate::new(format!("s{i}"), None, BBox::new(v, v, 30.0, 30.0))
        })
        .collect();
    let out = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    assert!(out.tables.is_empty());
    assert_eq!(out.standalone.len(), 5);
}

#[test]
fn test_all_fields_round_trip_every_candidate() {
    let mut cands = employee_grid();
    cands.push(FieldCandidate::new(
        "obs",
        Some("Observações"),
        BBox::new(50.0, 600.0, 400.0, 90.0),
    ));
    let out = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    let fields = out.all_fields(&FieldSettings::default());
    assert_eq!(fields.len(), 13);
    let last = fields.last().unwrap();
    assert_eq!(last.id, "obs");
    assert_eq!(last.name, "observacoes");
    assert_eq!(last.field_type, FieldType::Textarea);
}

#[test]
fn test_repeated_runs_are_identical() {
    let cands = employee_grid();
    let first = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    let second = extract_table_fields(&cands, &ExtractOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_json_input_with_mixed_geometry() {
    let json = r#"[
        {"id": "h1", "label": "Descrição", "position": {"x": 40, "y": 300, "width": 200, "height": 25, "page": 1}},
        {"id": "h2", "label": "Valor Total", "position": {"x": 260, "y": 300, "width": 100, "height": 25, "page": 1}},
        {"id": "d1", "bbox": {"x": 42, "y": 335, "width": 200, "height": 25}},
        {"id": "d2", "bbox": {"x": 258, "y": 336, "width": 100, "height": 25}}
    ]"#;
    let out = extract_table_fields_from_json(json, &ExtractOptions::default()).unwrap();
    assert_eq!(out.tables.len(), 1);
    assert!(out.tables[0].has_header_row);
    let fields = &out.mappings[0].fields;
    assert_eq!(fields[0].field_type, FieldType::Textarea);
    assert_eq!(fields[1].field_type, FieldType::Number);
    assert_eq!(fields[2].name, "tabela_1_linha1_col1");
    assert_eq!(fields[3].label, "Tabela 1 - Linha 1, Col 2");
}

#[test]
fn test_bad_json_is_an_error() {
    let err = extract_table_fields_from_json("{not json", &ExtractOptions::default()).unwrap_err();
    assert!(matches!(err, CellMapError::Json(_)));
}
