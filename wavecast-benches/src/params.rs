//! Benchmark parameter labels.

use std::fmt;

use wavecast_core::NeighbourSearch;

/// Parameters for a network generation benchmark run.
#[derive(Clone, Debug)]
pub struct GenerationBenchParams {
    /// Number of nodes in the network.
    pub node_count: usize,
    /// Candidate search strategy.
    pub search: NeighbourSearch,
}

impl fmt::Display for GenerationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let search = match self.search {
            NeighbourSearch::Auto => "auto",
            NeighbourSearch::Exhaustive => "exhaustive",
            NeighbourSearch::Grid => "grid",
        };
        write!(f, "n={},search={search}", self.node_count)
    }
}

/// Parameters for a propagation or analysis benchmark run.
#[derive(Clone, Debug)]
pub struct NetworkBenchParams {
    /// Number of nodes in the network.
    pub node_count: usize,
}

impl fmt::Display for NetworkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NeighbourSearch::Exhaustive, "n=500,search=exhaustive")]
    #[case(NeighbourSearch::Grid, "n=500,search=grid")]
    fn generation_labels_name_the_strategy(
        #[case] search: NeighbourSearch,
        #[case] expected: &str,
    ) {
        let params = GenerationBenchParams {
            node_count: 500,
            search,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn network_label_is_the_size() {
        assert_eq!(NetworkBenchParams { node_count: 42 }.to_string(), "n=42");
    }
}
