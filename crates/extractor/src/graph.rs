use crate::types::{Component, DependencyEdge, EdgeKind, SourceFile};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Undirected;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Ordered component graph produced by extraction.
///
/// Files stay in lexicographic path order; the petgraph view links files by
/// their resolved dependency edges and backs structural clustering.
#[derive(Debug, Serialize)]
pub struct ComponentGraph {
    /// Source files in lexicographic path order
    pub files: Vec<SourceFile>,

    /// Resolved dependency edges
    pub edges: Vec<DependencyEdge>,

    /// File-level dependency graph
    #[serde(skip)]
    graph: DiGraph<String, EdgeKind>,

    /// Component id -> (file index, component index)
    #[serde(skip)]
    component_index: HashMap<String, (usize, usize)>,

    /// Bare and qualified component name -> component ids carrying it
    #[serde(skip)]
    name_index: HashMap<String, Vec<String>>,
}

impl ComponentGraph {
    /// Build the graph from ordered files and resolved edges
    pub fn new(files: Vec<SourceFile>, edges: Vec<DependencyEdge>) -> Self {
        let mut graph = DiGraph::new();
        let mut file_index = HashMap::new();
        let mut component_index = HashMap::new();
        let mut name_index: HashMap<String, Vec<String>> = HashMap::new();

        for (file_pos, file) in files.iter().enumerate() {
            let idx = graph.add_node(file.path.clone());
            file_index.insert(file.path.clone(), idx);

            for (comp_pos, component) in file.components.iter().enumerate() {
                component_index.insert(component.id.clone(), (file_pos, comp_pos));
                name_index
                    .entry(component.name.clone())
                    .or_default()
                    .push(component.id.clone());
                if component.qualified_name != component.name {
                    name_index
                        .entry(component.qualified_name.clone())
                        .or_default()
                        .push(component.id.clone());
                }
            }
        }

        for edge in &edges {
            let from = file_index.get(edge.from.file_path());
            let to = file_index.get(edge.to.file_path());
            if let (Some(&from), Some(&to)) = (from, to) {
                if from != to {
                    graph.add_edge(from, to, edge.kind);
                }
            }
        }

        Self {
            files,
            edges,
            graph,
            component_index,
            name_index,
        }
    }

    /// Total number of components across all files
    pub fn component_count(&self) -> usize {
        self.files.iter().map(|f| f.components.len()).sum()
    }

    /// Number of files in the graph
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of resolved dependency edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a component by its stable id
    pub fn component_by_id(&self, id: &str) -> Option<&Component> {
        let (file_pos, comp_pos) = self.component_index.get(id)?;
        self.files.get(*file_pos)?.components.get(*comp_pos)
    }

    /// Look up a file by path
    pub fn file_by_path(&self, path: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Resolve a member reference from a model payload to a component id.
    ///
    /// Accepts a full id, a qualified name, or a bare name; ambiguous bare
    /// names resolve to the first carrier in file order.
    pub fn resolve_component(&self, reference: &str) -> Option<&Component> {
        if let Some(component) = self.component_by_id(reference) {
            return Some(component);
        }
        let ids = self.name_index.get(reference.trim())?;
        ids.first().and_then(|id| self.component_by_id(id))
    }

    /// Iterate every component in file order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.files.iter().flat_map(|f| f.components.iter())
    }

    /// Outgoing dependency count for a file
    pub fn out_degree(&self, path: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.from.file_path() == path)
            .count()
    }

    /// Complexity score for a file: weighted sum of component count,
    /// dependency count, and line count.
    pub fn complexity(&self, file: &SourceFile) -> usize {
        10 * file.components.len() + 5 * self.out_degree(&file.path) + file.line_count / 20
    }

    /// Aggregate complexity over a set of file paths
    pub fn aggregate_complexity<'a>(&self, paths: impl Iterator<Item = &'a str>) -> usize {
        paths
            .filter_map(|p| self.files.iter().find(|f| f.path == p))
            .map(|f| self.complexity(f))
            .sum()
    }

    /// Connected clusters of files in the dependency graph.
    ///
    /// Isolated files form singleton clusters. Clusters and their members are
    /// ordered by path so the output is deterministic.
    pub fn file_clusters(&self) -> Vec<Vec<String>> {
        let undirected = self.graph.clone().into_edge_type::<Undirected>();
        let mut cluster_of: BTreeMap<String, usize> = BTreeMap::new();
        let mut visited: HashMap<NodeIndex, usize> = HashMap::new();
        let mut next_cluster = 0usize;

        for start in undirected.node_indices() {
            if visited.contains_key(&start) {
                continue;
            }
            let cluster = next_cluster;
            next_cluster += 1;
            let mut stack = vec![start];
            while let Some(node) = stack.pop() {
                if visited.insert(node, cluster).is_some() {
                    continue;
                }
                for neighbor in undirected.neighbors(node) {
                    if !visited.contains_key(&neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }

        for (node, cluster) in &visited {
            if let Some(path) = undirected.node_weight(*node) {
                cluster_of.insert(path.clone(), *cluster);
            }
        }

        let mut grouped: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for (path, cluster) in cluster_of {
            grouped.entry(cluster).or_default().push(path);
        }

        let mut clusters: Vec<Vec<String>> = grouped.into_values().collect();
        for cluster in &mut clusters {
            cluster.sort();
        }
        clusters.sort();
        clusters
    }
}
