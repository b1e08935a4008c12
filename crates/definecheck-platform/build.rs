fn main() {
    if let Err(e) = definecheck_core::build_script::run() {
        panic!("definecheck: {e}");
    }
}
