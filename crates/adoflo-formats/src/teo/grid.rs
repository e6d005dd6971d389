//! Triangular mesh assembled from TEO blocks

use super::names::GridField;
use crate::ado::{ArrayValues, BlockValue, Scalar};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Triangular finite-element mesh
///
/// Node indices (`elem1..3`, `source_nodes`, `river_nodes`,
/// `boundary_nodes`) are zero-based. The numbering arrays `sourcenumber`,
/// `rivernumber` and `riverid` keep the values found in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Header pairs in file order
    pub header: Vec<(String, i64)>,
    /// Node x coordinates
    pub x_nodes: Vec<f64>,
    /// Node y coordinates
    pub y_nodes: Vec<f64>,
    /// First node of every element
    pub elem1: Vec<usize>,
    /// Second node of every element
    pub elem2: Vec<usize>,
    /// Third node of every element
    pub elem3: Vec<usize>,
    /// Element areas
    pub elem_area: Vec<f64>,
    /// Node influence areas
    pub nia: Vec<f64>,
    /// Source nodes
    pub source_nodes: Vec<usize>,
    /// Number of nodes per river
    pub num_nodes_river: Vec<i64>,
    /// River nodes, river after river
    pub river_nodes: Vec<usize>,
    /// Boundary nodes
    pub boundary_nodes: Vec<usize>,
    /// Boundary segment descriptors
    pub boundary_segments: Vec<i64>,
    /// Source numbering
    pub sourcenumber: ArrayValues,
    /// River numbering
    pub rivernumber: ArrayValues,
    /// River identifiers
    pub riverid: ArrayValues,
}

impl Grid {
    /// Assemble a grid from its header and named block payloads
    ///
    /// `origin` labels the source in errors. One-based node indices are
    /// converted to zero-based and checked against the node table.
    pub fn from_blocks(
        origin: &str,
        header: Vec<(String, i64)>,
        mut blocks: BTreeMap<GridField, BlockValue>,
    ) -> Result<Self> {
        let assembler = Assembler { origin };
        let mut take = |field: GridField| -> Result<BlockValue> {
            blocks.remove(&field).ok_or_else(|| Error::MissingBlock {
                origin: origin.to_string(),
                name: field.block_name(),
            })
        };

        let x_nodes = assembler.floats(GridField::XNodes, take(GridField::XNodes)?)?;
        let y_nodes = assembler.floats(GridField::YNodes, take(GridField::YNodes)?)?;
        if x_nodes.len() != y_nodes.len() {
            return Err(assembler.invalid(format!(
                "{} x coordinates but {} y coordinates",
                x_nodes.len(),
                y_nodes.len()
            )));
        }
        let node_count = x_nodes.len();

        let mut index = |field: GridField| -> Result<Vec<usize>> {
            let values = take(field)?;
            assembler.node_indices(field, values, node_count)
        };
        let elem1 = index(GridField::Elem1)?;
        let elem2 = index(GridField::Elem2)?;
        let elem3 = index(GridField::Elem3)?;
        let source_nodes = index(GridField::SourceNodes)?;
        let river_nodes = index(GridField::RiverNodes)?;
        let boundary_nodes = index(GridField::BoundaryNodes)?;
        if elem1.len() != elem2.len() || elem1.len() != elem3.len() {
            return Err(assembler.invalid(format!(
                "element node lists differ in length: {}, {}, {}",
                elem1.len(),
                elem2.len(),
                elem3.len()
            )));
        }

        let elem_area = assembler.floats(GridField::ElemArea, take(GridField::ElemArea)?)?;
        let nia = assembler.floats(GridField::Nia, take(GridField::Nia)?)?;
        let num_nodes_river =
            assembler.ints(GridField::NumNodesRiver, take(GridField::NumNodesRiver)?)?;
        let boundary_segments =
            assembler.ints(GridField::BoundarySegments, take(GridField::BoundarySegments)?)?;

        let mut numbering = |field: GridField| {
            blocks
                .remove(&field)
                .map_or_else(|| ArrayValues::Int(Vec::new()), into_array)
        };
        let sourcenumber = numbering(GridField::SourceNumber);
        let rivernumber = numbering(GridField::RiverNumber);
        let riverid = numbering(GridField::RiverId);

        Ok(Self {
            header,
            x_nodes,
            y_nodes,
            elem1,
            elem2,
            elem3,
            elem_area,
            nia,
            source_nodes,
            num_nodes_river,
            river_nodes,
            boundary_nodes,
            boundary_segments,
            sourcenumber,
            rivernumber,
            riverid,
        })
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.x_nodes.len()
    }

    /// Number of triangular elements
    pub fn element_count(&self) -> usize {
        self.elem1.len()
    }

    /// Value of a header entry, first match wins
    pub fn header_value(&self, key: &str) -> Option<i64> {
        self.header
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| *value)
    }

    /// Coordinates of every node
    pub fn node_coords(&self) -> Vec<(f64, f64)> {
        self.x_nodes
            .iter()
            .copied()
            .zip(self.y_nodes.iter().copied())
            .collect()
    }

    /// Coordinates of one node
    pub fn node_coord(&self, node: usize) -> Option<(f64, f64)> {
        Some((*self.x_nodes.get(node)?, *self.y_nodes.get(node)?))
    }

    /// The three nodes of an element
    pub fn nodes_for_element(&self, element: usize) -> Option<[usize; 3]> {
        Some([
            *self.elem1.get(element)?,
            *self.elem2.get(element)?,
            *self.elem3.get(element)?,
        ])
    }

    /// Elements that have `node` as one of their corners, in ascending order
    pub fn elements_for_node(&self, node: usize) -> Vec<usize> {
        (0..self.element_count())
            .filter(|&element| {
                self.elem1[element] == node
                    || self.elem2[element] == node
                    || self.elem3[element] == node
            })
            .collect()
    }

    /// Centroid of one element
    pub fn element_centroid(&self, element: usize) -> Option<(f64, f64)> {
        let [a, b, c] = self.nodes_for_element(element)?;
        let (xa, ya) = self.node_coord(a)?;
        let (xb, yb) = self.node_coord(b)?;
        let (xc, yc) = self.node_coord(c)?;
        Some(((xa + xb + xc) / 3.0, (ya + yb + yc) / 3.0))
    }

    /// Centroids of every element
    pub fn element_centroids(&self) -> Vec<(f64, f64)> {
        (0..self.element_count())
            .filter_map(|element| self.element_centroid(element))
            .collect()
    }

    /// Whether `node` is listed as a boundary node
    pub fn is_boundary_node(&self, node: usize) -> bool {
        self.boundary_nodes.contains(&node)
    }
}

struct Assembler<'a> {
    origin: &'a str,
}

impl Assembler<'_> {
    fn invalid(&self, reason: String) -> Error {
        Error::InvalidGrid {
            origin: self.origin.to_string(),
            reason,
        }
    }

    fn floats(&self, field: GridField, value: BlockValue) -> Result<Vec<f64>> {
        into_array(value)
            .to_f64_vec()
            .ok_or_else(|| self.invalid(format!("{field} holds text, expected numbers")))
    }

    fn ints(&self, field: GridField, value: BlockValue) -> Result<Vec<i64>> {
        match into_array(value) {
            ArrayValues::Int(values) => Ok(values),
            other => Err(self.invalid(format!(
                "{field} holds {} values, expected integers",
                other.element_kind()
            ))),
        }
    }

    fn node_indices(
        &self,
        field: GridField,
        value: BlockValue,
        node_count: usize,
    ) -> Result<Vec<usize>> {
        self.ints(field, value)?
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let index = usize::try_from(raw)
                    .ok()
                    .and_then(|raw| raw.checked_sub(1))
                    .ok_or_else(|| {
                        self.invalid(format!(
                            "{field} entry {position} is {raw}, node numbers start at 1"
                        ))
                    })?;
                if index >= node_count {
                    return Err(self.invalid(format!(
                        "{field} entry {position} refers to node {raw}, grid has {node_count} nodes"
                    )));
                }
                Ok(index)
            })
            .collect()
    }
}

/// Treat a scalar payload as a one-element array
fn into_array(value: BlockValue) -> ArrayValues {
    match value {
        BlockValue::Array(values) => values,
        BlockValue::Scalar(Scalar::Int(value)) => ArrayValues::Int(vec![value]),
        BlockValue::Scalar(Scalar::Float(value)) => ArrayValues::Float(vec![value]),
        BlockValue::Scalar(Scalar::Text(value)) => ArrayValues::Text(vec![value]),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    /// Two triangles sharing the diagonal of the unit square
    fn square_blocks() -> BTreeMap<GridField, BlockValue> {
        let ints = |values: Vec<i64>| BlockValue::Array(ArrayValues::Int(values));
        let floats = |values: Vec<f64>| BlockValue::Array(ArrayValues::Float(values));
        BTreeMap::from([
            (GridField::XNodes, floats(vec![0.0, 1.0, 1.0, 0.0])),
            (GridField::YNodes, floats(vec![0.0, 0.0, 1.0, 1.0])),
            (GridField::Elem1, ints(vec![1, 1])),
            (GridField::Elem2, ints(vec![2, 3])),
            (GridField::Elem3, ints(vec![3, 4])),
            (GridField::ElemArea, floats(vec![0.5, 0.5])),
            (GridField::Nia, floats(vec![0.25; 4])),
            (GridField::SourceNodes, BlockValue::Scalar(Scalar::Int(2))),
            (GridField::NumNodesRiver, ints(vec![2])),
            (GridField::RiverNodes, ints(vec![3, 4])),
            (GridField::BoundaryNodes, ints(vec![1, 2, 3, 4])),
            (GridField::BoundarySegments, ints(vec![4])),
        ])
    }

    fn square() -> Grid {
        Grid::from_blocks("square.teo", vec![("NUMBER NODES".to_string(), 4)], square_blocks())
            .unwrap()
    }

    #[test]
    fn test_indices_become_zero_based() {
        let grid = square();
        assert_eq!(grid.elem1, vec![0, 0]);
        assert_eq!(grid.elem2, vec![1, 2]);
        assert_eq!(grid.elem3, vec![2, 3]);
        assert_eq!(grid.source_nodes, vec![1]);
        assert_eq!(grid.river_nodes, vec![2, 3]);
        assert_eq!(grid.num_nodes_river, vec![2]);
        assert!(grid.riverid.is_empty());
    }

    #[test]
    fn test_queries() {
        let grid = square();
        assert_eq!(grid.node_count(), 4);
        assert_eq!(grid.element_count(), 2);
        assert_eq!(grid.header_value("NUMBER NODES"), Some(4));
        assert_eq!(grid.header_value("MISSING"), None);
        assert_eq!(grid.node_coord(2), Some((1.0, 1.0)));
        assert_eq!(grid.node_coord(9), None);
        assert_eq!(grid.node_coords().len(), 4);
        assert_eq!(grid.nodes_for_element(1), Some([0, 2, 3]));
        assert_eq!(grid.elements_for_node(0), vec![0, 1]);
        assert_eq!(grid.elements_for_node(1), vec![0]);
        assert!(grid.is_boundary_node(3));

        let centroids = grid.element_centroids();
        assert_eq!(centroids.len(), 2);
        assert!((centroids[0].0 - 2.0 / 3.0).abs() < 1e-12);
        assert!((centroids[0].1 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_required_block() {
        let mut blocks = square_blocks();
        blocks.remove(&GridField::Nia);
        let err = Grid::from_blocks("square.teo", Vec::new(), blocks).unwrap_err();
        assert_eq!(
            err.to_string(),
            "square.teo: missing grid block 'NODE INFLUENCE AREA='"
        );
    }

    #[test]
    fn test_zero_index_is_invalid() {
        let mut blocks = square_blocks();
        blocks.insert(
            GridField::Elem2,
            BlockValue::Array(ArrayValues::Int(vec![0, 3])),
        );
        assert!(matches!(
            Grid::from_blocks("square.teo", Vec::new(), blocks),
            Err(Error::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_index_past_node_table_is_invalid() {
        let mut blocks = square_blocks();
        blocks.insert(
            GridField::RiverNodes,
            BlockValue::Array(ArrayValues::Int(vec![5])),
        );
        let err = Grid::from_blocks("square.teo", Vec::new(), blocks).unwrap_err();
        assert!(err.to_string().contains("refers to node 5, grid has 4 nodes"));
    }

    #[test]
    fn test_coordinate_length_mismatch() {
        let mut blocks = square_blocks();
        blocks.insert(
            GridField::YNodes,
            BlockValue::Array(ArrayValues::Float(vec![0.0])),
        );
        assert!(matches!(
            Grid::from_blocks("square.teo", Vec::new(), blocks),
            Err(Error::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_integer_coordinates_accepted() {
        let mut blocks = square_blocks();
        blocks.insert(
            GridField::XNodes,
            BlockValue::Array(ArrayValues::Int(vec![0, 2, 2, 0])),
        );
        let grid = Grid::from_blocks("square.teo", Vec::new(), blocks).unwrap();
        assert_eq!(grid.x_nodes, vec![0.0, 2.0, 2.0, 0.0]);
    }
}
