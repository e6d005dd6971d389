//! Grid block name table

use std::fmt;

/// Grid field a TEO block is stored into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridField {
    /// `X-COORDINATES NODES=`
    XNodes,
    /// `Y-COORDINATES NODES=`
    YNodes,
    /// `ELEMENT NODES 1=====`
    Elem1,
    /// `ELEMENT NODES 2=====`
    Elem2,
    /// `ELEMENT NODES 3=====`
    Elem3,
    /// `ELEMENT AREA========`
    ElemArea,
    /// `NODE INFLUENCE AREA=`
    Nia,
    /// `SOURCE NODES========`
    SourceNodes,
    /// `NUMBER NODES/RIVER==`
    NumNodesRiver,
    /// `LIST RIVER NODES====`
    RiverNodes,
    /// `LIST BOUNDARY NODES=`
    BoundaryNodes,
    /// `BOUNDARY SEGMENTS===`
    BoundarySegments,
    /// `SOURCENUMBER`
    SourceNumber,
    /// `RIVERNUMBER`
    RiverNumber,
    /// `RIVERID`
    RiverId,
}

impl GridField {
    /// Every field, in file order
    pub const ALL: [Self; 15] = [
        Self::XNodes,
        Self::YNodes,
        Self::Elem1,
        Self::Elem2,
        Self::Elem3,
        Self::ElemArea,
        Self::Nia,
        Self::SourceNodes,
        Self::NumNodesRiver,
        Self::RiverNodes,
        Self::BoundaryNodes,
        Self::BoundarySegments,
        Self::SourceNumber,
        Self::RiverNumber,
        Self::RiverId,
    ];

    /// Look up the field for a block name
    ///
    /// Trailing whitespace on the name is ignored.
    pub fn from_block_name(name: &str) -> Option<Self> {
        let name = name.trim_end();
        Self::ALL.into_iter().find(|field| field.block_name() == name)
    }

    /// Block name as written in TEO files
    pub const fn block_name(self) -> &'static str {
        match self {
            Self::XNodes => "X-COORDINATES NODES=",
            Self::YNodes => "Y-COORDINATES NODES=",
            Self::Elem1 => "ELEMENT NODES 1=====",
            Self::Elem2 => "ELEMENT NODES 2=====",
            Self::Elem3 => "ELEMENT NODES 3=====",
            Self::ElemArea => "ELEMENT AREA========",
            Self::Nia => "NODE INFLUENCE AREA=",
            Self::SourceNodes => "SOURCE NODES========",
            Self::NumNodesRiver => "NUMBER NODES/RIVER==",
            Self::RiverNodes => "LIST RIVER NODES====",
            Self::BoundaryNodes => "LIST BOUNDARY NODES=",
            Self::BoundarySegments => "BOUNDARY SEGMENTS===",
            Self::SourceNumber => "SOURCENUMBER",
            Self::RiverNumber => "RIVERNUMBER",
            Self::RiverId => "RIVERID",
        }
    }

    /// Field name on [`Grid`](super::Grid)
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::XNodes => "x_nodes",
            Self::YNodes => "y_nodes",
            Self::Elem1 => "elem1",
            Self::Elem2 => "elem2",
            Self::Elem3 => "elem3",
            Self::ElemArea => "elem_area",
            Self::Nia => "nia",
            Self::SourceNodes => "source_nodes",
            Self::NumNodesRiver => "num_nodes_river",
            Self::RiverNodes => "river_nodes",
            Self::BoundaryNodes => "boundary_nodes",
            Self::BoundarySegments => "boundary_segments",
            Self::SourceNumber => "sourcenumber",
            Self::RiverNumber => "rivernumber",
            Self::RiverId => "riverid",
        }
    }

    /// Whether the file stores one-based node indices for this field
    pub const fn is_node_index(self) -> bool {
        matches!(
            self,
            Self::Elem1
                | Self::Elem2
                | Self::Elem3
                | Self::SourceNodes
                | Self::RiverNodes
                | Self::BoundaryNodes
        )
    }

    /// Whether a grid cannot be assembled without this block
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::SourceNumber | Self::RiverNumber | Self::RiverId)
    }
}

impl fmt::Display for GridField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block_name())
    }
}
