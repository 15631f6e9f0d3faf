//! Integration tests for void_graph searches

use approx::assert_relative_eq;
use void_graph::prelude::*;
use void_math::Vec3;

/// `size × size` grid with 4-neighbour links weighted by distance, plus
/// some expensive cells
fn grid(size: usize) -> (Graph, Vec<Vec3>) {
    let mut graph = Graph::new();
    let mut positions = Vec::new();

    for z in 0..size {
        for x in 0..size {
            let index = z * size + x;
            graph.add_node(Node::new(index));
            positions.push(Vec3::new(x as f32, 0.0, z as f32));
        }
    }

    for z in 0..size {
        for x in 0..size {
            let index = z * size + x;
            let penalty = if x == size / 2 && z > 0 { 5.0 } else { 1.0 };
            if x + 1 < size {
                graph.add_edge(Edge::new(index, index + 1, penalty));
            }
            if z + 1 < size {
                graph.add_edge(Edge::new(index, index + size, penalty));
            }
        }
    }
    (graph, positions)
}

#[test]
fn test_dijkstra_and_astar_agree_on_cost() {
    let (graph, positions) = grid(7);

    for &(source, target) in &[(0, 48), (6, 42), (3, 45), (10, 10), (44, 2)] {
        let mut dijkstra = Dijkstra::new(&graph, source, target);
        let mut astar = AStar::new(&graph, source, target, Euclidean(&positions));

        assert!(dijkstra.search());
        assert!(astar.search());

        let expected = dijkstra.path_cost().unwrap();
        assert_relative_eq!(astar.path_cost().unwrap(), expected, epsilon = 1e-4);

        let path = astar.get_path();
        assert_eq!(path.first(), Some(&source));
        assert_eq!(path.last(), Some(&target));
    }
}

#[test]
fn test_path_is_connected() {
    let (graph, positions) = grid(5);
    let mut astar = AStar::new(&graph, 0, 24, Euclidean(&positions));
    assert!(astar.search());

    let path = astar.get_path();
    for pair in path.windows(2) {
        assert!(graph.has_edge(pair[0], pair[1]));
    }
}

#[test]
fn test_source_equals_target() {
    let (graph, _) = grid(3);
    let mut dijkstra = Dijkstra::new(&graph, 4, 4);
    assert!(dijkstra.search());
    assert_eq!(dijkstra.get_path(), vec![4]);
    assert_eq!(dijkstra.path_cost(), Some(0.0));
}

#[test]
fn test_no_path() {
    let (mut graph, _) = grid(3);
    graph.add_node(Node::new(100));

    let mut dijkstra = Dijkstra::new(&graph, 0, 100);
    assert!(!dijkstra.search());
    assert!(!dijkstra.found());
    assert!(dijkstra.get_path().is_empty());
    assert!(!dijkstra.get_search_tree().is_empty());

    let mut missing = Dijkstra::new(&graph, 0, 999);
    assert!(!missing.search());
    assert!(missing.get_search_tree().is_empty());
}

#[test]
fn test_search_tree_edges_point_at_settled_nodes() {
    let (graph, _) = grid(4);
    let mut dijkstra = Dijkstra::new(&graph, 0, 15);
    dijkstra.search();

    let tree = dijkstra.get_search_tree();
    let mut targets: Vec<_> = tree.iter().map(|edge| edge.to).collect();
    targets.dedup();
    assert_eq!(targets.len(), tree.len());
    assert!(targets.contains(&15));
    assert!(!targets.contains(&0));
}

#[test]
fn test_research_after_mutation() {
    let (mut graph, _) = grid(3);
    {
        let mut dijkstra = Dijkstra::new(&graph, 0, 2);
        dijkstra.search();
        assert_eq!(dijkstra.get_path(), vec![0, 1, 2]);
    }

    graph.remove_node(1);
    let mut dijkstra = Dijkstra::new(&graph, 0, 2);
    assert!(dijkstra.search());
    assert!(!dijkstra.get_path().contains(&1));
}

#[test]
fn test_unweighted_searches_find_paths() {
    let (graph, _) = grid(4);

    let mut bfs = Bfs::new(&graph, 0, 15);
    assert!(bfs.search());
    assert_eq!(bfs.get_path().len(), 7);

    let mut dfs = Dfs::new(&graph, 0, 15);
    assert!(dfs.search());
    let path = dfs.get_path();
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&15));
}
