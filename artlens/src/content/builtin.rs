//! Built-in content for Repin's "Ceremonial Sitting of the State Council".

use super::catalog::{PoiCatalog, PointOfInterest};

const LOST_PORTRAIT_TITLE: &str = "Потерянный портрет.";
const LOST_PORTRAIT_BODY: &str = "О существовании портрета Николая II долгое время не знали — он обнаружился \
лишь на аукционе в 1990-е годы. Тогда выяснилось, что после революции, когда \
большевики вывозили из Мариинского дворца картины, в зале Государственного \
совета нашли полотно Репина, а неподалёку — ещё одну раму. В ней и оказался \
портрет Николая II кисти Репина.";

const IMAGERY_TITLE: &str = "Художественные образы.";
const IMAGERY_BODY: &str = "Созданные Репиным образы обладают самостоятельной художественной ценностью. \
Так, обер-прокурор Победоносцев изображён с бескровным лицом, стёртыми \
чертами и тусклым взглядом. Он словно воплощает мёртвый и мертвящий \
бюрократизм. Это один из немногих портретов, в которых заметно негативное \
отношение художника к своему персонажу.";

const COMPOSITION_TITLE: &str = "Композиция.";
const COMPOSITION_BODY: &str = "Чтобы уравновесить и оживить композицию из десятков сидящих фигур, Репин \
предложил слева изобразить во весь рост графа Бобринского, а справа — \
служащего канцелярии. В центре он разместил государственного секретаря Плеве, \
читающего высочайший указ. Если мысленно соединить три стоящие фигуры, \
получится треугольник, создающий ощущение пространства и ясно выявляющий \
перспективу.";

/// The catalog shipped with the AR page (POIs 1..3).
pub fn builtin_catalog() -> PoiCatalog {
    PoiCatalog::new(vec![
        PointOfInterest::new(1, LOST_PORTRAIT_TITLE, LOST_PORTRAIT_BODY),
        PointOfInterest::new(2, IMAGERY_TITLE, IMAGERY_BODY),
        PointOfInterest::new(3, COMPOSITION_TITLE, COMPOSITION_BODY),
    ])
    .unwrap_or_default()
}
