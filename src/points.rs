use crate::structs::Point;

/// Brazilian state capitals: (name, latitude, longitude).
const CAPITALS: [(&str, f64, f64); 27] = [
    ("São Paulo", -23.5505, -46.6333),
    ("Aracaju", -10.9167, -37.05),
    ("Belém", -1.4558, -48.5039),
    ("Belo Horizonte", -19.9167, -43.9333),
    ("Boa Vista", 2.81972, -60.67333),
    ("Brasília", -15.7939, -47.882),
    ("Campo Grande", -20.44278, -54.64639),
    ("Cuiabá", -15.5989, -56.0949),
    ("Curitiba", -25.4297, -49.2711),
    ("Florianópolis", -27.5935, -48.55854),
    ("Fortaleza", -3.7275, -38.5275),
    ("Goiânia", -16.6667, -49.25),
    ("João Pessoa", -7.12, -34.88),
    ("Macapá", 0.033, -51.05),
    ("Maceió", -9.66583, -35.73528),
    ("Manaus", -3.1189, -60.0217),
    ("Natal", -5.7833, -35.2),
    ("Palmas", -10.16745, -48.32766),
    ("Porto Alegre", -30.0331, -51.23),
    ("Porto Velho", -8.76194, -63.90389),
    ("Recife", -8.05, -34.9),
    ("Rio Branco", -9.97472, -67.81),
    ("Rio de Janeiro", -22.9111, -43.2056),
    ("Salvador", -12.9747, -38.4767),
    ("São Luís", -2.5283, -44.3044),
    ("Teresina", -5.08917, -42.80194),
    ("Vitória", -20.2889, -40.3083),
];

/// Returns the fixed point set in its canonical order.
pub fn capitals() -> Vec<Point> {
    CAPITALS
        .iter()
        .map(|&(name, lat, lon)| Point::new(name, lat, lon))
        .collect()
}
