use super::*;

const SAMPLE: &str = "\
continent,name,length,area
Africa,Nile,6650,3254555
Africa,Congo,4700
\"South America\",\"Parana–Rio de la Plata\",4880,2582672
";

#[test]
fn reads_columns_aligned_by_row() {
    let t = CsvTable::from_reader(SAMPLE.as_bytes()).unwrap();
    assert_eq!(t.row_count(), 3);
    assert_eq!(t.headers(), ["continent", "name", "length", "area"]);

    let names = t.column("name").unwrap();
    assert_eq!(names, ["Nile", "Congo", "Parana–Rio de la Plata"]);

    let continents = t.column("continent").unwrap();
    assert_eq!(continents[2], "South America");
}

#[test]
fn short_records_yield_empty_cells() {
    let t = CsvTable::from_reader(SAMPLE.as_bytes()).unwrap();
    let area = t.column("area").unwrap();
    assert_eq!(area[1], "");
}

#[test]
fn missing_column_is_a_data_error() {
    let t = CsvTable::from_reader(SAMPLE.as_bytes()).unwrap();
    assert!(!t.has_column("discharge"));
    let err = t.column("discharge").unwrap_err();
    assert!(matches!(err, RiverGlyphError::Data(_)));
}

#[test]
fn missing_file_is_a_data_error() {
    let err = CsvTable::from_path(Path::new("definitely/not/here.csv")).unwrap_err();
    assert!(err.to_string().contains("failed to open dataset"));
}

#[test]
fn header_only_document_has_no_rows() {
    let t = CsvTable::from_reader("continent,name,length,area\n".as_bytes()).unwrap();
    assert_eq!(t.row_count(), 0);
    assert!(t.column("name").unwrap().is_empty());
}

#[test]
fn invalid_utf8_cell_is_decoded_lossily() {
    let mut doc = b"continent,name,length,area\nAfrica,Nile,6650,3254555\nAfrica,Cong".to_vec();
    doc.push(0xff);
    doc.extend_from_slice(b"o,4700,4014500\n");

    let t = CsvTable::from_reader(doc.as_slice()).unwrap();
    assert_eq!(t.row_count(), 2);
    let names = t.column("name").unwrap();
    assert_eq!(names, ["Nile", "Cong\u{fffd}o"]);
    assert_eq!(t.column("length").unwrap()[1], "4700");
}
