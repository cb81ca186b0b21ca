//! Built-in exercise catalog, inserted at startup with `is_custom = false`.

use ironlog_schema::PrimaryMuscleGroup;

#[derive(Debug, Clone, Copy)]
pub struct BuiltinExercise {
    pub name: &'static str,
    pub description: &'static str,
    pub muscle_groups: &'static [&'static str],
    pub primary: PrimaryMuscleGroup,
}

pub static BUILTIN_EXERCISES: &[BuiltinExercise] = &[
    BuiltinExercise {
        name: "Жим штанги лёжа",
        description: "Базовое упражнение для развития грудных мышц",
        muscle_groups: &["грудь", "трицепс", "передние дельты"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Жим гантелей лёжа",
        description: "Упражнение для грудных мышц с гантелями",
        muscle_groups: &["грудь", "трицепс"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Отжимания",
        description: "Базовое упражнение с собственным весом",
        muscle_groups: &["грудь", "трицепс", "передние дельты"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Разведение гантелей лёжа",
        description: "Изолирующее упражнение для грудных мышц",
        muscle_groups: &["грудь"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Отжимания на брусьях",
        description: "Упражнение для нижней части груди и трицепса",
        muscle_groups: &["грудь", "трицепс"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Пуловер с гантелью",
        description: "Упражнение для грудных и широчайших",
        muscle_groups: &["грудь", "широчайшие"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Сведение рук в кроссовере",
        description: "Изолирующее упражнение для грудных",
        muscle_groups: &["грудь"],
        primary: PrimaryMuscleGroup::Chest,
    },
    BuiltinExercise {
        name: "Становая тяга",
        description: "Базовое многосуставное упражнение",
        muscle_groups: &["спина", "ноги", "ягодицы", "предплечья"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Подтягивания",
        description: "Базовое упражнение для широчайших мышц спины",
        muscle_groups: &["широчайшие", "бицепс", "предплечья"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Тяга штанги в наклоне",
        description: "Упражнение для развития толщины спины",
        muscle_groups: &["широчайшие", "ромбовидные", "бицепс"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Тяга верхнего блока",
        description: "Упражнение для широчайших мышц на тренажёре",
        muscle_groups: &["широчайшие", "бицепс"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Тяга гантели в наклоне",
        description: "Односторонняя тяга для спины",
        muscle_groups: &["широчайшие", "ромбовидные"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Гиперэкстензия",
        description: "Упражнение для разгибателей спины",
        muscle_groups: &["спина", "бицепс бедра"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Тяга нижнего блока",
        description: "Горизонтальная тяга для спины",
        muscle_groups: &["широчайшие", "ромбовидные", "бицепс"],
        primary: PrimaryMuscleGroup::Back,
    },
    BuiltinExercise {
        name: "Приседания со штангой",
        description: "Король упражнений для ног",
        muscle_groups: &["квадрицепс", "ягодицы", "бицепс бедра"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Жим ногами",
        description: "Упражнение для ног на тренажёре",
        muscle_groups: &["квадрицепс", "ягодицы"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Выпады",
        description: "Упражнение для ног и ягодиц",
        muscle_groups: &["квадрицепс", "ягодицы", "бицепс бедра"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Разгибание ног",
        description: "Изолирующее упражнение для квадрицепса",
        muscle_groups: &["квадрицепс"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Сгибание ног",
        description: "Изолирующее упражнение для бицепса бедра",
        muscle_groups: &["бицепс бедра"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Подъём на носки",
        description: "Упражнение для икроножных мышц",
        muscle_groups: &["икры"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Румынская тяга",
        description: "Упражнение для бицепса бедра и ягодиц",
        muscle_groups: &["бицепс бедра", "ягодицы", "спина"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Гакк-приседания",
        description: "Приседания в тренажёре",
        muscle_groups: &["квадрицепс", "ягодицы"],
        primary: PrimaryMuscleGroup::Legs,
    },
    BuiltinExercise {
        name: "Армейский жим",
        description: "Базовое упражнение для дельтовидных мышц",
        muscle_groups: &["передние дельты", "средние дельты", "трицепс"],
        primary: PrimaryMuscleGroup::Shoulders,
    },
    BuiltinExercise {
        name: "Жим гантелей сидя",
        description: "Жим для плеч с гантелями",
        muscle_groups: &["передние дельты", "средние дельты"],
        primary: PrimaryMuscleGroup::Shoulders,
    },
    BuiltinExercise {
        name: "Махи гантелями в стороны",
        description: "Изолирующее упражнение для средних дельт",
        muscle_groups: &["средние дельты"],
        primary: PrimaryMuscleGroup::Shoulders,
    },
    BuiltinExercise {
        name: "Тяга штанги к подбородку",
        description: "Упражнение для дельт и трапеций",
        muscle_groups: &["средние дельты", "трапеции"],
        primary: PrimaryMuscleGroup::Shoulders,
    },
    BuiltinExercise {
        name: "Махи гантелями в наклоне",
        description: "Изолирующее упражнение для задних дельт",
        muscle_groups: &["задние дельты"],
        primary: PrimaryMuscleGroup::Shoulders,
    },
    BuiltinExercise {
        name: "Жим в тренажёре сидя",
        description: "Жим для плеч в тренажёре Смита",
        muscle_groups: &["передние дельты", "средние дельты"],
        primary: PrimaryMuscleGroup::Shoulders,
    },
    BuiltinExercise {
        name: "Подъём штанги на бицепс",
        description: "Базовое упражнение для бицепса",
        muscle_groups: &["бицепс"],
        primary: PrimaryMuscleGroup::Biceps,
    },
    BuiltinExercise {
        name: "Подъём гантелей на бицепс",
        description: "Упражнение для бицепса с гантелями",
        muscle_groups: &["бицепс"],
        primary: PrimaryMuscleGroup::Biceps,
    },
    BuiltinExercise {
        name: "Молотки",
        description: "Сгибание рук нейтральным хватом",
        muscle_groups: &["бицепс", "предплечья"],
        primary: PrimaryMuscleGroup::Biceps,
    },
    BuiltinExercise {
        name: "Сгибание на скамье Скотта",
        description: "Изолирующее упражнение для бицепса",
        muscle_groups: &["бицепс"],
        primary: PrimaryMuscleGroup::Biceps,
    },
    BuiltinExercise {
        name: "Французский жим",
        description: "Изолирующее упражнение для трицепса",
        muscle_groups: &["трицепс"],
        primary: PrimaryMuscleGroup::Triceps,
    },
    BuiltinExercise {
        name: "Разгибание рук на блоке",
        description: "Упражнение для трицепса на тренажёре",
        muscle_groups: &["трицепс"],
        primary: PrimaryMuscleGroup::Triceps,
    },
    BuiltinExercise {
        name: "Разгибание руки с гантелью из-за головы",
        description: "Изолирующее упражнение для трицепса",
        muscle_groups: &["трицепс"],
        primary: PrimaryMuscleGroup::Triceps,
    },
    BuiltinExercise {
        name: "Отжимания от скамьи",
        description: "Обратные отжимания для трицепса",
        muscle_groups: &["трицепс", "передние дельты"],
        primary: PrimaryMuscleGroup::Triceps,
    },
    BuiltinExercise {
        name: "Бег",
        description: "Аэробная нагрузка на беговой дорожке или улице",
        muscle_groups: &["ноги", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Велосипед",
        description: "Кардио на велотренажёре или велосипеде",
        muscle_groups: &["ноги", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Плавание",
        description: "Полноценная аэробная нагрузка",
        muscle_groups: &["всё тело", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Эллипс",
        description: "Кардио на эллиптическом тренажёре",
        muscle_groups: &["ноги", "руки", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Гребля",
        description: "Кардио на гребном тренажёре",
        muscle_groups: &["спина", "руки", "ноги", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Скакалка",
        description: "Интенсивное кардио со скакалкой",
        muscle_groups: &["ноги", "икры", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Берпи",
        description: "Высокоинтенсивное упражнение для всего тела",
        muscle_groups: &["всё тело", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Jumping Jacks",
        description: "Прыжки с разведением рук и ног",
        muscle_groups: &["ноги", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Box Jumps",
        description: "Прыжки на тумбу",
        muscle_groups: &["ноги", "ягодицы", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Mountain Climbers",
        description: "Упражнение альпинист",
        muscle_groups: &["пресс", "ноги", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Ходьба",
        description: "Низкоинтенсивное кардио",
        muscle_groups: &["ноги", "сердце"],
        primary: PrimaryMuscleGroup::Cardio,
    },
    BuiltinExercise {
        name: "Планка",
        description: "Статическое упражнение для кора",
        muscle_groups: &["пресс", "спина", "плечи"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Растяжка квадрицепса",
        description: "Растяжка передней поверхности бедра",
        muscle_groups: &["квадрицепс"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Растяжка бицепса бедра",
        description: "Растяжка задней поверхности бедра",
        muscle_groups: &["бицепс бедра"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Растяжка спины",
        description: "Упражнения для гибкости спины",
        muscle_groups: &["спина"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Йога",
        description: "Комплекс упражнений для гибкости и баланса",
        muscle_groups: &["всё тело"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Пилатес",
        description: "Система упражнений для укрепления мышц",
        muscle_groups: &["кор", "спина"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Растяжка грудных мышц",
        description: "Растяжка для улучшения осанки",
        muscle_groups: &["грудь"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Растяжка плеч",
        description: "Упражнения для гибкости плечевого пояса",
        muscle_groups: &["плечи"],
        primary: PrimaryMuscleGroup::Flexibility,
    },
    BuiltinExercise {
        name: "Скручивания на пресс",
        description: "Базовое упражнение для пресса",
        muscle_groups: &["пресс"],
        primary: PrimaryMuscleGroup::AbsHyperextension,
    },
    BuiltinExercise {
        name: "Подъём ног в висе",
        description: "Упражнение для нижнего пресса",
        muscle_groups: &["пресс", "сгибатели бедра"],
        primary: PrimaryMuscleGroup::AbsHyperextension,
    },
    BuiltinExercise {
        name: "Планка на пресс",
        description: "Статическое упражнение для кора",
        muscle_groups: &["пресс", "кор"],
        primary: PrimaryMuscleGroup::AbsHyperextension,
    },
    BuiltinExercise {
        name: "Гиперэкстензия для пресса",
        description: "Упражнение для разгибателей спины и ягодиц",
        muscle_groups: &["спина", "ягодицы"],
        primary: PrimaryMuscleGroup::AbsHyperextension,
    },
    BuiltinExercise {
        name: "Велосипед для пресса",
        description: "Скручивания с поворотом корпуса",
        muscle_groups: &["пресс", "косые мышцы"],
        primary: PrimaryMuscleGroup::AbsHyperextension,
    },
];
