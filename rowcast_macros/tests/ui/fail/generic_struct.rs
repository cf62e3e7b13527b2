use rowcast_macros::Mappable;

#[derive(Mappable, Default)]
struct Wrapped<T> {
    #[db]
    value: T,
}

fn main() {}
