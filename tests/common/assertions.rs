//! Custom assertion macros for scenario tests.

/// Assert that a barrel exists and contains every given line.
#[macro_export]
macro_rules! assert_barrel {
    ($env:expr, $path:expr, [$($line:expr),* $(,)?]) => {
        let content = $env
            .read($path)
            .unwrap_or_else(|| panic!("Expected barrel at '{}', but it doesn't exist", $path));
        $(
            assert!(
                content.contains($line),
                "Expected '{}' in {}.\nContent:\n{}",
                $line,
                $path,
                content
            );
        )*
    };
}

/// Assert that command output contains a string.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $expected:expr) => {
        let output = $result.combined_output();
        assert!(
            output.contains($expected),
            "Expected output to contain '{}'.\nOutput:\n{}",
            $expected,
            output
        );
    };
}
