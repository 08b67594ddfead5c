use hierperf::error::AppResult;

fn main() -> AppResult<()> {
    hierperf::entry::run()
}
