#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]
//! Integration tests for TEO grid assembly using a 3x3 node fixture mesh
//!
//! The fixture covers a 200 x 200 square with nine nodes numbered row by row
//! from the origin and eight triangles, two per cell.

use adoflo_formats::Error;
use adoflo_formats::ado::{ArrayValues, Mode};
use adoflo_formats::teo::{self, Grid, TeoFile};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

fn square() -> Grid {
    teo::open(fixture("square.teo"), Mode::Read)
        .unwrap()
        .read_grid()
        .unwrap()
}

#[test]
fn header_pairs_in_file_order() {
    let grid = square();
    assert_eq!(
        grid.header,
        vec![
            ("NUMBER NODES".to_string(), 9),
            ("NUMBER ELEMENTS".to_string(), 8),
            ("NUMBER RIVER NODES".to_string(), 3),
            ("NUMBER SOURCES".to_string(), 1),
        ]
    );
    assert_eq!(grid.header_value("NUMBER NODES"), Some(9));
}

#[test]
fn counts_match_header() {
    let grid = square();
    assert_eq!(grid.node_count(), 9);
    assert_eq!(grid.element_count(), 8);
    assert_eq!(grid.river_nodes.len(), 3);
    assert_eq!(grid.elem_area.len(), 8);
    assert_eq!(grid.nia.len(), 9);
}

#[test]
fn node_indices_are_zero_based() {
    let grid = square();
    assert_eq!(grid.elem1, vec![0, 0, 1, 1, 3, 3, 4, 4]);
    assert_eq!(grid.elem2, vec![1, 4, 2, 5, 4, 7, 5, 8]);
    assert_eq!(grid.elem3, vec![4, 3, 5, 4, 7, 6, 8, 7]);
    assert_eq!(grid.source_nodes, vec![4]);
    assert_eq!(grid.river_nodes, vec![6, 7, 8]);
    assert_eq!(grid.boundary_nodes, vec![0, 1, 2, 5, 8, 7, 6, 3]);
}

#[test]
fn numbering_blocks_are_unchanged() {
    let grid = square();
    assert_eq!(grid.num_nodes_river, vec![3]);
    assert_eq!(grid.sourcenumber, ArrayValues::Int(vec![1]));
    assert_eq!(grid.rivernumber, ArrayValues::Int(vec![1]));
    assert_eq!(grid.riverid, ArrayValues::Text(vec!["WAAL".to_string()]));
}

#[test]
fn mesh_queries() {
    let grid = square();

    assert_eq!(grid.node_coord(4), Some((100.0, 100.0)));
    assert_eq!(grid.node_coords()[8], (200.0, 200.0));
    assert_eq!(grid.nodes_for_element(3), Some([1, 5, 4]));
    assert_eq!(grid.nodes_for_element(8), None);
    assert_eq!(grid.elements_for_node(4), vec![0, 1, 3, 4, 6, 7]);
    assert_eq!(grid.elements_for_node(0), vec![0, 1]);

    assert!(grid.is_boundary_node(0));
    assert!(!grid.is_boundary_node(4));

    let (x, y) = grid.element_centroid(0).unwrap();
    assert!((x - 200.0 / 3.0).abs() < 1e-9);
    assert!((y - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(grid.element_centroids().len(), 8);
}

#[test]
fn unknown_block_name_is_rejected() {
    let text = std::fs::read_to_string(fixture("square.teo"))
        .unwrap()
        .replace("*SET*RIVERNUMBER", "*SET*RIVERCOUNT");
    let err = teo::read_grid(text.as_bytes(), "renamed.teo").unwrap_err();
    match err {
        Error::UnknownBlockName { location, name } => {
            assert_eq!(name, "RIVERCOUNT");
            assert_eq!(location.origin, "renamed.teo");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn writing_is_not_implemented() {
    let grid = square();
    let dir = tempfile::tempdir().unwrap();
    let mut file = TeoFile::open(dir.path().join("out.teo"), Mode::Write).unwrap();
    let err = file.write(&grid).unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)));
}
