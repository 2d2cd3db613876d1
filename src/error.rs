//! Error types for dungeon generation

/// Errors reported by the generator and result accessors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Stage width or height below the 5-tile minimum
    InvalidDimension {
        dimension: &'static str,
        value: usize,
    },
    /// Tile lookup outside the generated grid
    OutOfRangeTile {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// A point string that does not parse as "x,y"
    InvalidPoint(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::InvalidDimension { dimension, value } => {
                write!(
                    f,
                    "DungeonError: invalid stage {}: {} (minimum 5)",
                    dimension, value
                )
            }
            GenerationError::OutOfRangeTile { x, y, width, height } => {
                write!(
                    f,
                    "DungeonError: tile ({},{}) is outside the {}x{} grid",
                    x, y, width, height
                )
            }
            GenerationError::InvalidPoint(s) => {
                write!(f, "DungeonError: cannot parse point from {:?}", s)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimension_names_the_dimension() {
        let err = GenerationError::InvalidDimension {
            dimension: "width",
            value: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("width"), "message should name the dimension: {}", msg);
        assert!(msg.contains('4'), "message should carry the value: {}", msg);
    }

    #[test]
    fn test_out_of_range_display() {
        let err = GenerationError::OutOfRangeTile {
            x: 9,
            y: 2,
            width: 7,
            height: 7,
        };
        assert!(err.to_string().contains("(9,2)"));
    }
}
