/// Letters per group in printed messages.
pub const GROUP: usize = 5;

/// Splits `msg` into groups of `width` characters separated by single spaces;
/// the last group may be shorter.
pub fn groups(msg: &str, width: usize) -> String {
	let width = width.max(1);
	let mut out = String::with_capacity(msg.len() + msg.len() / width);
	for (i, c) in msg.chars().enumerate() {
		if i > 0 && i % width == 0 {
			out.push(' ');
		}
		out.push(c);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fives() {
		assert_eq!(groups("QVPQSOKOILPUBKJZPISFXDW", GROUP), "QVPQS OKOIL PUBKJ ZPISF XDW");
		assert_eq!(groups("ABCDEFGHIJ", GROUP), "ABCDE FGHIJ");
		assert_eq!(groups("ABC", GROUP), "ABC");
		assert_eq!(groups("", GROUP), "");
	}

	#[test]
	fn zero_width_is_one() {
		assert_eq!(groups("ABC", 0), "A B C");
	}
}
