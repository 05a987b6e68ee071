use super::Pattern;

impl Pattern {
    /// Start of base column `index` inside one repeat. The column past the
    /// last one starts at 1.
    pub fn column_start_position(&self, index: usize) -> f32 {
        self.start_positions.get(index).copied().unwrap_or(1.0)
    }

    /// Pixel widths of every column for a panel `panel_width` pixels wide.
    /// The widths always add up to `panel_width`.
    pub fn column_widths(&self, panel_width: i32) -> Vec<i32> {
        let base = self.base_columns_size();
        let repeat_width = panel_width as f32 / self.repeats as f32;
        let base_widths: Vec<i32> = (0..base)
            .map(|index| {
                let extent = self.column_start_position(index + 1) - self.column_start_position(index);
                (extent * repeat_width).round() as i32
            })
            .collect();

        let mut widths: Vec<i32> = (0..self.columns_size())
            .map(|column| base_widths[column % base])
            .collect();
        distribute_error(&mut widths, panel_width.max(0));
        widths
    }
}

/// Nudges `widths` by one pixel at a time, on evenly spaced columns, until
/// they add up to `target`. A column is never pushed below zero; the nudge
/// moves on to the next column instead.
pub fn distribute_error(widths: &mut [i32], target: i32) {
    let len = widths.len();
    if len == 0 {
        return;
    }
    let error = widths.iter().sum::<i32>() - target;
    if error == 0 {
        return;
    }

    let adjustment = -error.signum();
    let count = error.unsigned_abs() as usize;
    let interval = (len / count).max(1);
    for step in 0..count {
        let start = step * interval;
        let Some(column) = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&column| widths[column] + adjustment >= 0)
        else {
            tracing::warn!(target, error, "column widths cannot reach the panel width");
            return;
        };
        widths[column] += adjustment;
    }
}

/// Extra base start positions must ascend strictly inside (0, 1).
pub fn start_positions_are_valid(positions: &[f32]) -> bool {
    positions.iter().all(|&position| position > 0.0 && position < 1.0)
        && positions.windows(2).all(|pair| pair[0] < pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_fills_the_panel() {
        let pattern = Pattern::new(8);
        assert_eq!(pattern.column_widths(640), vec![640]);
    }

    #[test]
    fn repeats_share_the_base_widths() {
        let mut pattern = Pattern::new(8);
        pattern.insert_column(0.25);
        pattern.set_repeats(2);
        assert_eq!(pattern.column_widths(800), vec![100, 300, 100, 300]);
    }

    #[test]
    fn rounding_error_is_absorbed() {
        let mut pattern = Pattern::new(8);
        pattern.insert_column(1.0 / 3.0);
        pattern.insert_column(2.0 / 3.0);
        pattern.set_repeats(3);
        let widths = pattern.column_widths(100);
        assert_eq!(widths.iter().sum::<i32>(), 100);
        assert!(widths.iter().all(|&width| (10..=12).contains(&width)));
    }

    #[test]
    fn distribute_error_spreads_evenly() {
        let mut widths = vec![10; 8];
        distribute_error(&mut widths, 76);
        assert_eq!(widths, vec![9, 10, 9, 10, 9, 10, 9, 10]);

        let mut widths = vec![10; 4];
        distribute_error(&mut widths, 42);
        assert_eq!(widths, vec![11, 10, 11, 10]);
    }

    #[test]
    fn distribute_error_skips_empty_columns() {
        let mut widths = vec![0, 0, 3];
        distribute_error(&mut widths, 1);
        assert_eq!(widths, vec![0, 0, 1]);
    }

    #[test]
    fn start_position_validation() {
        assert!(start_positions_are_valid(&[]));
        assert!(start_positions_are_valid(&[0.1, 0.5, 0.9]));
        assert!(!start_positions_are_valid(&[0.5, 0.5]));
        assert!(!start_positions_are_valid(&[0.0]));
        assert!(!start_positions_are_valid(&[0.5, 1.0]));
    }
}
