/// Sorts `items` by descending score, keeping the input order among equal scores.
///
/// `Vec::sort_by` is stable, which is what makes repeated rankings of the same input
/// reproducible. Scores compare with `f64::total_cmp`: a positive NaN sorts first and a
/// negative NaN last.
pub fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_descending() {
        let mut items = vec![0.1, 0.9, -0.3, 0.5];
        sort_by_score_desc(&mut items, |x| *x);
        assert_eq!(items, vec![0.9, 0.5, 0.1, -0.3]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut items = vec![("a", 0.5), ("b", 0.7), ("c", 0.5), ("d", 0.7), ("e", 0.5)];
        sort_by_score_desc(&mut items, |(_, s)| *s);
        let names: Vec<&str> = items.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn nan_scores_sort_without_panicking() {
        let mut items = vec![0.2, f64::NAN, 0.8, -f64::NAN, 0.5, f64::NAN];
        sort_by_score_desc(&mut items, |x| *x);

        assert!(items[0].is_nan() && items[0].is_sign_positive());
        assert!(items[1].is_nan() && items[1].is_sign_positive());
        assert_eq!(&items[2..5], &[0.8, 0.5, 0.2]);
        assert!(items[5].is_nan() && items[5].is_sign_negative());
    }
}
