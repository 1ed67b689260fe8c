use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(text) = std::str::from_utf8(data) {
                let args: Vec<String> = text.split('\n').map(str::to_string).collect();
                let _ = brio::Config::from_args(&args);
            }
        });
    }
}
