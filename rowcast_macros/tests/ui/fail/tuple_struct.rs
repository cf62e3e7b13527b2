use rowcast_macros::Mappable;

#[derive(Mappable)]
struct Pair(i64, i64);

fn main() {}
