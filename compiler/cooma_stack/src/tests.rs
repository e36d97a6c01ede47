use super::*;

fn nesting_depth(n: u64) -> u64 {
    ensure_sufficient_stack(|| if n == 0 { 0 } else { nesting_depth(n - 1) + 1 })
}

#[test]
fn passes_the_result_through() {
    assert_eq!(ensure_sufficient_stack(|| "done"), "done");
    let result: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(result, Ok(7));
}

#[test]
fn recursion_deeper_than_a_test_thread_stack() {
    assert_eq!(nesting_depth(200_000), 200_000);
}
