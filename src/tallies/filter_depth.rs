/// Depth filter for tallies: counts hits read out by one fibre depth
/// (1 long, 2 short, 0 for hits built without depth assignment)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFilter {
    pub depth: i32,
}

impl DepthFilter {
    pub fn new(depth: i32) -> Self {
        Self { depth }
    }

    pub fn matches(&self, depth: i32) -> bool {
        self.depth == depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_filter_matches() {
        let long = DepthFilter::new(1);
        assert!(long.matches(1));
        assert!(!long.matches(2));
        assert!(!long.matches(0));
    }
}
