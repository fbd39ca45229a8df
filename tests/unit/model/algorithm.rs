use super::*;

#[test]
fn wire_names_round_trip_through_serde() {
    for a in Algorithm::ALL {
        let json = serde_json::to_string(&a).unwrap();
        assert_eq!(json, format!("\"{}\"", a.wire_name()));
        let back: Algorithm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}

#[test]
fn from_str_accepts_wire_names_and_aliases() {
    assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
    assert_eq!("astar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
    assert_eq!(
        "Iterative Deepening DFS".parse::<Algorithm>().unwrap(),
        Algorithm::Iddfs
    );
    assert_eq!("BiBFS".parse::<Algorithm>().unwrap(), Algorithm::BidirectionalBfs);
    assert!("dijkstra".parse::<Algorithm>().is_err());
}

#[test]
fn every_algorithm_has_metadata() {
    for a in Algorithm::ALL {
        assert!(!a.title().is_empty());
        assert!(!a.description().is_empty());
        assert_eq!(a.to_string(), a.wire_name());
    }
}

#[test]
fn slugs_parse_back() {
    for a in Algorithm::ALL {
        assert_eq!(a.slug().parse::<Algorithm>().unwrap(), a);
    }
}
