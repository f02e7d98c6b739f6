//! Input normalization and the field checks shared by create and modify.
//!
//! Checks push human-readable messages into a shared list instead of
//! returning early, so a caller sees every problem with a request at once.

/// Trim surrounding whitespace from a free-text field.
pub fn clean_text(raw: &str) -> String { raw.trim().to_string() }

/// Normalize an id-list field: drop all whitespace so `"1, 2,3"` and
/// `"1,2,3"` are the same list.
pub fn clean_orders(raw: &str) -> String {
  raw.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn check_required(field: &str, value: &str, problems: &mut Vec<String>) {
  if value.is_empty() {
    problems.push(format!("{field} must not be empty"));
  }
}

/// A non-empty orders list must be comma-separated positive integers in
/// canonical decimal form — no sign, no leading zeros.
pub fn check_orders(orders: &str, problems: &mut Vec<String>) {
  if orders.is_empty() {
    return;
  }
  let well_formed = orders
    .split(',')
    .all(|part| part.parse::<u64>().is_ok_and(|n| n > 0 && n.to_string() == part));
  if !well_formed {
    problems.push(format!(
      "orders must be a comma-separated list of positive integers, got {orders:?}"
    ));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_orders_strips_all_whitespace() {
    assert_eq!(clean_orders(" 1, 2,\t3 "), "1,2,3");
    assert_eq!(clean_orders(""), "");
  }

  #[test]
  fn check_orders_accepts_positive_integer_lists() {
    let mut problems = Vec::new();
    check_orders("1", &mut problems);
    check_orders("1,2,30", &mut problems);
    check_orders("", &mut problems);
    assert!(problems.is_empty());
  }

  #[test]
  fn check_orders_rejects_malformed_lists() {
    for bad in ["bad", "0", "-1", "+1", "007", "1,,2", "1,x", "1.5"] {
      let mut problems = Vec::new();
      check_orders(bad, &mut problems);
      assert_eq!(problems.len(), 1, "expected one problem for {bad:?}");
    }
  }
}
