//! Formula inspection core: reference extraction, header labels, row
//! detection and dependency graphs

pub mod graph;
pub mod headers;
pub mod heuristics;
pub mod references;

pub use graph::{
    build_dependency_graph, collect_formula_cells, ColumnDependencies, DependencyGraph,
};
pub use headers::{build_header_map, HeaderMaps};
pub use heuristics::{find_first_formula_row, find_header_row};
pub use references::ReferenceExtractor;
