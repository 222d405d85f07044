//! Statistics read back from the graph database

use crate::graph::{GraphResult, SqliteGraph};

/// Works listed in the statistics report
const TOP_WORKS: usize = 10;

/// Graph statistics summary
#[derive(Debug, Clone, Default)]
pub struct GraphStatistics {
    pub people: u64,
    pub people_with_birthdate: u64,
    pub works: u64,
    pub credits: u64,

    /// Most credited works with their number of people
    pub top_works: Vec<(String, u64)>,
}

impl GraphStatistics {
    /// Mean number of credits per person
    pub fn credits_per_person(&self) -> f64 {
        if self.people == 0 {
            return 0.0;
        }
        self.credits as f64 / self.people as f64
    }
}

/// Loads statistics from the graph database
pub fn load_statistics(graph: &SqliteGraph) -> GraphResult<GraphStatistics> {
    Ok(GraphStatistics {
        people: graph.count_people()?,
        people_with_birthdate: graph.count_people_with_birthdate()?,
        works: graph.count_works()?,
        credits: graph.count_credits()?,
        top_works: graph.most_credited_works(TOP_WORKS)?,
    })
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Graph Statistics ===\n");

    println!("Overview:");
    println!("  People: {}", stats.people);
    println!(
        "  People with a birth date: {}",
        stats.people_with_birthdate
    );
    println!("  Works: {}", stats.works);
    println!("  Credits: {}", stats.credits);
    println!("  Credits per person: {:.1}", stats.credits_per_person());
    println!();

    if !stats.top_works.is_empty() {
        println!("Most Credited Works:");
        for (work, people) in &stats.top_works {
            println!("  {} ({} people)", work, people);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::PersonRecord;
    use crate::graph::GraphSink;

    #[test]
    fn test_credits_per_person() {
        let stats = GraphStatistics {
            people: 4,
            credits: 10,
            ..Default::default()
        };
        assert_eq!(stats.credits_per_person(), 2.5);
        assert_eq!(GraphStatistics::default().credits_per_person(), 0.0);
    }

    #[test]
    fn test_load_statistics() {
        let mut graph = SqliteGraph::new_in_memory().unwrap();
        graph
            .add_person(&PersonRecord {
                url: "/wiki/Jane".to_string(),
                name: "Jane".to_string(),
                birthdate: None,
                work_urls: vec!["/wiki/Film_A".to_string(), "/wiki/Film_B".to_string()],
            })
            .unwrap();

        let stats = load_statistics(&graph).unwrap();

        assert_eq!(stats.people, 1);
        assert_eq!(stats.people_with_birthdate, 0);
        assert_eq!(stats.works, 2);
        assert_eq!(stats.credits, 2);
        assert_eq!(stats.top_works.len(), 2);
    }
}
