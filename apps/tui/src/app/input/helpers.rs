/// Previous index in a ring of `len` items. Empty rings stay at 0.
pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    match len {
        0 => 0,
        _ if index == 0 || index >= len => len - 1,
        _ => index - 1,
    }
}

/// Next index in a ring of `len` items. Empty rings stay at 0.
pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}
