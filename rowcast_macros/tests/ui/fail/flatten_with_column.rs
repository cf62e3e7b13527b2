use rowcast_macros::Mappable;

#[derive(Mappable, Default)]
struct Base {
    #[db]
    id: i64,
}

#[derive(Mappable, Default)]
struct Wrapper {
    #[db(flatten, column = "base")]
    base: Base,
}

fn main() {}
